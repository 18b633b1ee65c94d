// storefront/src/state/affiliate_link.rs

use crate::error::ApiResult;
use crate::models::{AffiliateLink, AffiliateLinkInput};
use crate::services::AffiliateLinkService;
use crate::state::store::{apply, EntityStore, StoreState};
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct AffiliateLinkState {
  service: AffiliateLinkService,
  store: EntityStore<AffiliateLink>,
}

impl AffiliateLinkState {
  pub fn new(service: AffiliateLinkService) -> Self {
    Self {
      service,
      store: EntityStore::new(),
    }
  }

  pub fn store(&self) -> &EntityStore<AffiliateLink> {
    &self.store
  }

  pub fn snapshot(&self) -> StoreState<AffiliateLink> {
    self.store.snapshot()
  }

  pub async fn fetch_links(&self) -> ApiResult<Vec<AffiliateLink>> {
    self.store.track("fetch_links", self.service.list(), apply::all).await
  }

  pub async fn create_link(&self, input: &AffiliateLinkInput) -> ApiResult<AffiliateLink> {
    self.store.track("create_link", self.service.create(input), apply::prepend).await
  }

  pub async fn update_link(&self, id: &str, input: &AffiliateLinkInput) -> ApiResult<AffiliateLink> {
    self.store.track("update_link", self.service.update(id, input), apply::replace).await
  }

  pub async fn disable_link(&self, code: &str) -> ApiResult<AffiliateLink> {
    self.store.track("disable_link", self.service.disable(code), apply::replace).await
  }

  /// Links usable at `now`. A link past its expiry is excluded even while
  /// the backend still reports it active.
  pub fn active_links(&self, now: DateTime<Utc>) -> Vec<AffiliateLink> {
    self
      .store
      .items()
      .into_iter()
      .filter(|link| link.is_active_at(now))
      .collect()
  }
}
