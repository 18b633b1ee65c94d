// storefront/src/models/affiliate.rs

use super::id::{EntityId, Identified};
use super::subscription::require;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AffiliateStatus {
  Pending,
  Active,
  Rejected,
  Suspended,
}

impl AffiliateStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      AffiliateStatus::Pending => "PENDING",
      AffiliateStatus::Active => "ACTIVE",
      AffiliateStatus::Rejected => "REJECTED",
      AffiliateStatus::Suspended => "SUSPENDED",
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
  pub bank_name: String,
  pub account_number: String,
  pub account_holder: String,
  #[serde(default)]
  pub branch: Option<String>,
}

impl BankInfo {
  pub fn validate(&self) -> ApiResult<()> {
    require("Bank name", &self.bank_name)?;
    require("Account number", &self.account_number)?;
    require("Account holder", &self.account_holder)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateProfile {
  #[serde(alias = "_id")]
  pub id: EntityId,
  #[serde(alias = "user")]
  pub user_id: EntityId,
  pub affiliate_code: String,
  /// Percentage, e.g. `10.0` for 10%.
  pub commission_rate: f64,
  #[serde(default)]
  pub total_earnings: f64,
  #[serde(default)]
  pub pending_earnings: f64,
  #[serde(default)]
  pub paid_earnings: f64,
  #[serde(default)]
  pub total_referrals: u64,
  #[serde(default)]
  pub successful_referrals: u64,
  pub status: AffiliateStatus,
  #[serde(default)]
  pub bank_info: Option<BankInfo>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl Identified for AffiliateProfile {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateStats {
  #[serde(default)]
  pub total_clicks: u64,
  #[serde(default)]
  pub total_conversions: u64,
  #[serde(default)]
  pub conversion_rate: f64,
  #[serde(default)]
  pub total_earnings: f64,
  #[serde(default)]
  pub pending_earnings: f64,
  #[serde(default)]
  pub paid_earnings: f64,
  #[serde(default)]
  pub active_links: u64,
}

/// Row of the admin affiliate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateSummary {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub affiliate_code: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  pub status: AffiliateStatus,
  #[serde(default)]
  pub total_earnings: f64,
  #[serde(default)]
  pub total_referrals: u64,
}

impl Identified for AffiliateSummary {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionStatus {
  Pending,
  Approved,
  Paid,
  Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
  #[serde(alias = "_id")]
  pub id: EntityId,
  #[serde(alias = "order")]
  pub order_id: EntityId,
  pub amount: f64,
  pub status: CommissionStatus,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAffiliateRequest {
  pub bank_info: BankInfo,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
}

impl RegisterAffiliateRequest {
  pub fn validate(&self) -> ApiResult<()> {
    self.bank_info.validate()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
  pub amount: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bank_info: Option<BankInfo>,
}

impl PayoutRequest {
  pub fn validate(&self) -> ApiResult<()> {
    if !self.amount.is_finite() || self.amount <= 0.0 {
      return Err(ApiError::InvalidInput("Payout amount must be greater than zero.".to_string()));
    }
    if let Some(bank_info) = &self.bank_info {
      bank_info.validate()?;
    }
    Ok(())
  }
}
