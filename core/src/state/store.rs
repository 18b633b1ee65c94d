// storefront/src/state/store.rs

use crate::core::ContextData;
use crate::error::ApiResult;
use crate::models::{EntityId, Identified};
use std::future::Future;
use tracing::{event, Level};

/// List, current entity and request status for one resource.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
  pub items: Vec<T>,
  pub current: Option<T>,
  pub loading: bool,
  /// Display message of the last failed call; cleared when a call starts.
  pub error: Option<String>,
}

impl<T> Default for StoreState<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      current: None,
      loading: false,
      error: None,
    }
  }
}

/// Shared state cell behind a resource store.
///
/// Clones share the same state. Calls are never serialised: whichever
/// response resolves last is the one left in the store.
#[derive(Debug)]
pub struct EntityStore<T: Identified + Clone + Send + Sync + 'static> {
  data: ContextData<StoreState<T>>,
}

impl<T: Identified + Clone + Send + Sync + 'static> Clone for EntityStore<T> {
  fn clone(&self) -> Self {
    Self { data: self.data.clone() }
  }
}

impl<T: Identified + Clone + Send + Sync + 'static> Default for EntityStore<T> {
  fn default() -> Self {
    Self {
      data: ContextData::default(),
    }
  }
}

impl<T: Identified + Clone + Send + Sync + 'static> EntityStore<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn snapshot(&self) -> StoreState<T> {
    self.data.snapshot()
  }

  pub fn items(&self) -> Vec<T> {
    self.data.read().items.clone()
  }

  pub fn current(&self) -> Option<T> {
    self.data.read().current.clone()
  }

  pub fn is_loading(&self) -> bool {
    self.data.read().loading
  }

  pub fn error(&self) -> Option<String> {
    self.data.read().error.clone()
  }

  pub fn find(&self, id: &EntityId) -> Option<T> {
    self.data.read().items.iter().find(|item| item.id() == id).cloned()
  }

  pub fn replace_all(&self, items: Vec<T>) {
    self.data.update(|s| s.items = items);
  }

  pub fn set_current(&self, entity: T) {
    self.data.update(|s| s.current = Some(entity));
  }

  /// A created entity goes first in the list and becomes current.
  pub fn prepend(&self, entity: T) {
    self.data.update(|s| apply::prepend(s, &entity));
  }

  /// Swaps the entity with a matching id in place. Other entries are untouched,
  /// and `current` changes only when it is the same entity.
  pub fn replace(&self, entity: T) {
    self.data.update(|s| apply::replace(s, &entity));
  }

  /// Runs `call` with `loading` set, then applies its result.
  ///
  /// No lock is held while the call is in flight. On failure the display
  /// message is stored in `error` and the error is returned unchanged.
  pub async fn track<R, Fut>(
    &self,
    action: &'static str,
    call: Fut,
    apply: impl FnOnce(&mut StoreState<T>, &R),
  ) -> ApiResult<R>
  where
    Fut: Future<Output = ApiResult<R>>,
  {
    self.data.update(|s| {
      s.loading = true;
      s.error = None;
    });
    let result = call.await;
    self.data.update(|s| {
      s.loading = false;
      match &result {
        Ok(value) => apply(s, value),
        Err(e) => {
          event!(Level::DEBUG, action, error = %e, "Store call failed.");
          s.error = Some(e.to_string());
        }
      }
    });
    result
  }
}

/// `apply` callbacks shared by the resource stores.
pub(crate) mod apply {
  use super::StoreState;
  use crate::models::Identified;

  #[allow(clippy::ptr_arg)]
  pub fn all<T: Clone>(s: &mut StoreState<T>, items: &Vec<T>) {
    s.items = items.clone();
  }

  pub fn current<T: Clone>(s: &mut StoreState<T>, entity: &T) {
    s.current = Some(entity.clone());
  }

  pub fn prepend<T: Clone>(s: &mut StoreState<T>, entity: &T) {
    s.items.insert(0, entity.clone());
    s.current = Some(entity.clone());
  }

  pub fn replace<T: Identified + Clone>(s: &mut StoreState<T>, entity: &T) {
    if let Some(slot) = s.items.iter_mut().find(|item| item.id() == entity.id()) {
      *slot = entity.clone();
    }
    if s.current.as_ref().is_some_and(|c| c.id() == entity.id()) {
      s.current = Some(entity.clone());
    }
  }
}
