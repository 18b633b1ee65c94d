// storefront/src/models/affiliate_link.rs

use super::id::{EntityId, Identified};
use super::subscription::require;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffiliateLinkStatus {
  Active,
  Expired,
  Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLink {
  #[serde(alias = "_id")]
  pub id: EntityId,
  #[serde(alias = "affiliate")]
  pub affiliate_id: EntityId,
  #[serde(alias = "product")]
  pub product_id: EntityId,
  pub code: String,
  pub short_url: String,
  #[serde(default)]
  pub expires_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub clicks: u64,
  #[serde(default)]
  pub conversions: u64,
  #[serde(default)]
  pub commission_earned: f64,
  pub status: AffiliateLinkStatus,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl AffiliateLink {
  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at.is_some_and(|expires_at| expires_at <= now)
  }

  /// A link only counts as active while its expiry is in the future,
  /// whatever the stored status says.
  pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
    self.status == AffiliateLinkStatus::Active && !self.is_expired_at(now)
  }

  /// Status to display: a stored `Active` past its expiry reads as `Expired`.
  pub fn effective_status(&self, now: DateTime<Utc>) -> AffiliateLinkStatus {
    match self.status {
      AffiliateLinkStatus::Active if self.is_expired_at(now) => AffiliateLinkStatus::Expired,
      status => status,
    }
  }

  pub fn conversion_rate(&self) -> f64 {
    if self.clicks == 0 {
      return 0.0;
    }
    self.conversions as f64 * 100.0 / self.clicks as f64
  }
}

impl Identified for AffiliateLink {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLinkInput {
  pub product_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expires_at: Option<DateTime<Utc>>,
}

impl AffiliateLinkInput {
  pub fn validate(&self, now: DateTime<Utc>) -> ApiResult<()> {
    require("Product", &self.product_id)?;
    if self.expires_at.is_some_and(|expires_at| expires_at <= now) {
      return Err(ApiError::InvalidInput("Expiry must be in the future.".to_string()));
    }
    Ok(())
  }
}
