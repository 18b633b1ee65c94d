// storefront/src/session/storage.rs

//! Persistence backends for session values.

use crate::error::{ApiError, ApiResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Lifetime class of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
  /// Dies with the running client.
  Session,
  /// Survives restarts.
  Local,
  /// Mirror readable by the server side (referral attribution).
  Cookie,
}

pub trait SessionStorage: Send + Sync {
  fn get(&self, scope: StorageScope, key: &str) -> Option<String>;
  fn set(&self, scope: StorageScope, key: &str, value: &str) -> ApiResult<()>;
  fn remove(&self, scope: StorageScope, key: &str) -> ApiResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
  values: RwLock<HashMap<(StorageScope, String), String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SessionStorage for MemoryStorage {
  fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
    self.values.read().get(&(scope, key.to_string())).cloned()
  }

  fn set(&self, scope: StorageScope, key: &str, value: &str) -> ApiResult<()> {
    self.values.write().insert((scope, key.to_string()), value.to_string());
    Ok(())
  }

  fn remove(&self, scope: StorageScope, key: &str) -> ApiResult<()> {
    self.values.write().remove(&(scope, key.to_string()));
    Ok(())
  }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct PersistedValues {
  #[serde(default)]
  local: BTreeMap<String, String>,
  #[serde(default)]
  cookies: BTreeMap<String, String>,
}

/// Keeps `Local` and `Cookie` values in a JSON file; `Session` values stay in memory.
#[derive(Debug)]
pub struct FileStorage {
  path: PathBuf,
  persisted: RwLock<PersistedValues>,
  session: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
  /// Opens the file at `path`. A missing file starts empty.
  pub fn open(path: impl AsRef<Path>) -> ApiResult<Self> {
    let path = path.as_ref().to_path_buf();
    let persisted = match fs::read(&path) {
      Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => PersistedValues::default(),
      Ok(bytes) => serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Storage(format!("Corrupt session file {}: {}", path.display(), e)))?,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => PersistedValues::default(),
      Err(e) => return Err(ApiError::Storage(format!("Cannot read session file {}: {}", path.display(), e))),
    };
    tracing::debug!(path = %path.display(), "Session file opened.");
    Ok(Self {
      path,
      persisted: RwLock::new(persisted),
      session: RwLock::new(BTreeMap::new()),
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn flush(&self, values: &PersistedValues) -> ApiResult<()> {
    let bytes = serde_json::to_vec_pretty(values)
      .map_err(|e| ApiError::Storage(format!("Cannot encode session values: {}", e)))?;
    fs::write(&self.path, bytes)
      .map_err(|e| ApiError::Storage(format!("Cannot write session file {}: {}", self.path.display(), e)))
  }

  /// Edits the persisted map behind `scope` and rewrites the file.
  /// `Session` values live in memory only.
  fn update(&self, scope: StorageScope, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> ApiResult<()> {
    if scope == StorageScope::Session {
      let mut guard = self.session.write();
      edit(&mut *guard);
      return Ok(());
    }
    let mut guard = self.persisted.write();
    let map = if scope == StorageScope::Local { &mut guard.local } else { &mut guard.cookies };
    edit(map);
    self.flush(&*guard)
  }
}

impl SessionStorage for FileStorage {
  fn get(&self, scope: StorageScope, key: &str) -> Option<String> {
    match scope {
      StorageScope::Session => self.session.read().get(key).cloned(),
      StorageScope::Local => self.persisted.read().local.get(key).cloned(),
      StorageScope::Cookie => self.persisted.read().cookies.get(key).cloned(),
    }
  }

  fn set(&self, scope: StorageScope, key: &str, value: &str) -> ApiResult<()> {
    self.update(scope, |map| {
      map.insert(key.to_string(), value.to_string());
    })
  }

  fn remove(&self, scope: StorageScope, key: &str) -> ApiResult<()> {
    self.update(scope, |map| {
      map.remove(key);
    })
  }
}
