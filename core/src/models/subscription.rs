// storefront/src/models/subscription.rs

use super::id::{EntityId, Identified};
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
  Active,
  Inactive,
}

impl Default for ActivityStatus {
  fn default() -> Self {
    ActivityStatus::Active
  }
}

/// A subscription plan offered for a product (e.g. "family", "individual").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionType {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub product_id: EntityId,
  pub type_name: String,
  pub display_name: String,
  #[serde(default)]
  pub status: ActivityStatus,
  #[serde(default)]
  pub description: Option<String>,
}

impl Identified for SubscriptionType {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTypeInput {
  pub product_id: String,
  pub type_name: String,
  pub display_name: String,
  pub status: ActivityStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl SubscriptionTypeInput {
  pub fn validate(&self) -> ApiResult<()> {
    require("Product", &self.product_id)?;
    require("Type name", &self.type_name)?;
    require("Display name", &self.display_name)
  }
}

/// A priced duration of a subscription plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDuration {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub product_id: EntityId,
  pub subscription_type_id: EntityId,
  #[serde(alias = "duration")]
  pub label: String,
  pub days: u32,
  pub price: f64,
}

impl Identified for SubscriptionDuration {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDurationInput {
  pub product_id: String,
  pub subscription_type_id: String,
  pub label: String,
  pub days: u32,
  pub price: f64,
}

impl SubscriptionDurationInput {
  pub fn validate(&self) -> ApiResult<()> {
    require("Product", &self.product_id)?;
    require("Subscription type", &self.subscription_type_id)?;
    require("Duration label", &self.label)?;
    if self.days == 0 {
      return Err(ApiError::InvalidInput("Duration must be at least one day.".to_string()));
    }
    if !self.price.is_finite() || self.price < 0.0 {
      return Err(ApiError::InvalidInput("Price must be zero or more.".to_string()));
    }
    Ok(())
  }
}

pub(crate) fn require(field: &str, value: &str) -> ApiResult<()> {
  if value.trim().is_empty() {
    return Err(ApiError::InvalidInput(format!("{} is required.", field)));
  }
  Ok(())
}
