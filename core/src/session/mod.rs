// storefront/src/session/mod.rs

//! Client session: bearer token, user profile, referral code and the admin slot.
//!
//! A [`Session`] is created once at start-up and handed to everything that
//! needs persisted client state. Nothing else reads the storage directly.

pub mod storage;
pub mod token;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageScope};
pub use token::{decode_unverified, TokenClaims, TokenError};

use crate::error::{ApiError, ApiResult};
use crate::models::UserProfile;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed storage keys.
pub mod keys {
  pub const TOKEN: &str = "token";
  pub const USER: &str = "user";
  pub const AFFILIATE_CODE: &str = "affiliateCode";
  pub const ADMIN_TOKEN: &str = "adminToken";
  pub const ADMIN_USER: &str = "adminUser";
}

const ALL_SCOPES: [StorageScope; 3] = [StorageScope::Session, StorageScope::Local, StorageScope::Cookie];

pub type RedirectListener = Arc<dyn Fn(&str) + Send + Sync>;

struct SessionInner {
  storage: Arc<dyn SessionStorage>,
  pending_redirect: Mutex<Option<String>>,
  on_redirect: Mutex<Option<RedirectListener>>,
}

#[derive(Clone)]
pub struct Session {
  inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Session")
      .field("has_token", &self.token().is_some())
      .field("pending_redirect", &*self.inner.pending_redirect.lock())
      .finish()
  }
}

impl Session {
  pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
    Self {
      inner: Arc::new(SessionInner {
        storage,
        pending_redirect: Mutex::new(None),
        on_redirect: Mutex::new(None),
      }),
    }
  }

  pub fn in_memory() -> Self {
    Self::new(Arc::new(MemoryStorage::new()))
  }

  fn storage(&self) -> &dyn SessionStorage {
    self.inner.storage.as_ref()
  }

  fn read_first(&self, scopes: &[StorageScope], key: &str) -> Option<String> {
    scopes
      .iter()
      .find_map(|scope| self.storage().get(*scope, key))
      .filter(|value| !value.trim().is_empty())
  }

  fn remove_everywhere(&self, key: &str) -> ApiResult<()> {
    for scope in ALL_SCOPES {
      self.storage().remove(scope, key)?;
    }
    Ok(())
  }

  // --- Customer token and profile ---

  pub fn token(&self) -> Option<String> {
    self.read_first(&[StorageScope::Session, StorageScope::Local], keys::TOKEN)
  }

  /// Stores the bearer token for this run, and across restarts when `remember` is set.
  pub fn store_token(&self, token: &str, remember: bool) -> ApiResult<()> {
    let token = token.trim();
    if token.is_empty() {
      return Err(ApiError::InvalidInput("Token must not be empty.".to_string()));
    }
    self.storage().set(StorageScope::Session, keys::TOKEN, token)?;
    if remember {
      self.storage().set(StorageScope::Local, keys::TOKEN, token)?;
    }
    debug!(remember, "Bearer token stored.");
    Ok(())
  }

  pub fn user(&self) -> Option<UserProfile> {
    let raw = self.read_first(&[StorageScope::Session, StorageScope::Local], keys::USER)?;
    match serde_json::from_str(&raw) {
      Ok(user) => Some(user),
      Err(e) => {
        warn!(error = %e, "Stored user profile is unreadable; ignoring it.");
        None
      }
    }
  }

  pub fn store_user(&self, user: &UserProfile) -> ApiResult<()> {
    let raw = serde_json::to_string(user).map_err(|e| ApiError::Storage(format!("Cannot encode user profile: {}", e)))?;
    self.storage().set(StorageScope::Session, keys::USER, &raw)?;
    self.storage().set(StorageScope::Local, keys::USER, &raw)
  }

  /// Tears down the customer session. The referral code is kept.
  pub fn logout(&self) -> ApiResult<()> {
    self.remove_everywhere(keys::TOKEN)?;
    self.remove_everywhere(keys::USER)?;
    info!("Customer session cleared.");
    Ok(())
  }

  // --- Authentication failure handling ---

  /// Drops the rejected credentials and schedules navigation to `home_route`.
  pub fn expire(&self, home_route: &str) {
    if let Err(e) = self.logout() {
      warn!(error = %e, "Failed to clear the expired session from storage.");
    }
    self.schedule_redirect(home_route);
    info!(route = home_route, "Session expired.");
  }

  /// Records a pending navigation and notifies the redirect listener, if any.
  pub fn schedule_redirect(&self, route: &str) {
    *self.inner.pending_redirect.lock() = Some(route.to_string());
    let listener = self.inner.on_redirect.lock().clone();
    if let Some(listener) = listener {
      listener(route);
    }
  }

  pub fn take_redirect(&self) -> Option<String> {
    self.inner.pending_redirect.lock().take()
  }

  pub fn on_redirect(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
    *self.inner.on_redirect.lock() = Some(Arc::new(listener));
  }

  // --- Referral attribution ---

  pub fn affiliate_code(&self) -> Option<String> {
    self.read_first(&ALL_SCOPES, keys::AFFILIATE_CODE)
  }

  /// Remembers a referral code in every scope, including the cookie mirror.
  pub fn remember_affiliate_code(&self, code: &str) -> ApiResult<()> {
    let code = code.trim();
    if code.is_empty() {
      return Err(ApiError::InvalidInput("Referral code must not be empty.".to_string()));
    }
    for scope in ALL_SCOPES {
      self.storage().set(scope, keys::AFFILIATE_CODE, code)?;
    }
    debug!(code, "Referral code remembered.");
    Ok(())
  }

  pub fn clear_affiliate_code(&self) -> ApiResult<()> {
    self.remove_everywhere(keys::AFFILIATE_CODE)
  }

  // --- Admin slot ---

  pub fn admin_token(&self) -> Option<String> {
    self.read_first(&[StorageScope::Local], keys::ADMIN_TOKEN)
  }

  /// Raw stored admin profile; parsing is left to the caller.
  pub fn admin_user_raw(&self) -> Option<String> {
    self.read_first(&[StorageScope::Local], keys::ADMIN_USER)
  }

  pub fn store_admin(&self, token: &str, user: &UserProfile) -> ApiResult<()> {
    let raw = serde_json::to_string(user).map_err(|e| ApiError::Storage(format!("Cannot encode admin profile: {}", e)))?;
    self.storage().set(StorageScope::Local, keys::ADMIN_TOKEN, token.trim())?;
    self.storage().set(StorageScope::Local, keys::ADMIN_USER, &raw)
  }

  pub fn clear_admin(&self) -> ApiResult<()> {
    self.remove_everywhere(keys::ADMIN_TOKEN)?;
    self.remove_everywhere(keys::ADMIN_USER)
  }
}
