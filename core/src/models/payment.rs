// storefront/src/models/payment.rs

use super::id::{EntityId, Identified};
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `Pending -> Processing -> Completed`, or `Failed`/`Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
  Pending,
  Processing,
  Completed,
  Failed,
  Cancelled,
}

impl PaymentStatus {
  pub const ALL: [PaymentStatus; 5] = [
    PaymentStatus::Pending,
    PaymentStatus::Processing,
    PaymentStatus::Completed,
    PaymentStatus::Failed,
    PaymentStatus::Cancelled,
  ];

  pub fn next(self) -> Option<PaymentStatus> {
    match self {
      PaymentStatus::Pending => Some(PaymentStatus::Processing),
      PaymentStatus::Processing => Some(PaymentStatus::Completed),
      _ => None,
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, PaymentStatus::Completed | PaymentStatus::Failed | PaymentStatus::Cancelled)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      PaymentStatus::Pending => "PENDING",
      PaymentStatus::Processing => "PROCESSING",
      PaymentStatus::Completed => "COMPLETED",
      PaymentStatus::Failed => "FAILED",
      PaymentStatus::Cancelled => "CANCELLED",
    }
  }
}

impl fmt::Display for PaymentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for PaymentStatus {
  type Err = ApiError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    PaymentStatus::ALL
      .into_iter()
      .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| ApiError::InvalidInput(format!("Unknown payment status '{}'.", s)))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
  BankTransfer,
  Cod,
  Momo,
  Vnpay,
  #[serde(other)]
  Unknown,
}

impl fmt::Display for PaymentMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      PaymentMethod::BankTransfer => "Bank transfer",
      PaymentMethod::Cod => "Cash on delivery",
      PaymentMethod::Momo => "MoMo",
      PaymentMethod::Vnpay => "VNPay",
      PaymentMethod::Unknown => "Other",
    };
    f.write_str(label)
  }
}

/// Details the customer submits after paying by bank transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferInfo {
  pub bank_name: String,
  pub account_number: String,
  pub account_name: String,
  #[serde(default)]
  pub transfer_content: Option<String>,
  #[serde(default)]
  pub transferred_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub proof_url: Option<String>,
}

impl BankTransferInfo {
  pub fn validate(&self) -> crate::error::ApiResult<()> {
    super::subscription::require("Bank name", &self.bank_name)?;
    super::subscription::require("Account number", &self.account_number)?;
    super::subscription::require("Account name", &self.account_name)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
  #[serde(alias = "_id")]
  pub id: EntityId,
  #[serde(alias = "order")]
  pub order_id: EntityId,
  pub amount: f64,
  pub status: PaymentStatus,
  pub payment_method: PaymentMethod,
  #[serde(default)]
  pub transaction_id: Option<String>,
  #[serde(default)]
  pub bank_transfer: Option<BankTransferInfo>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Payment {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
  pub order_id: String,
  pub amount: f64,
  pub payment_method: PaymentMethod,
}

impl CreatePaymentRequest {
  pub fn validate(&self) -> crate::error::ApiResult<()> {
    super::subscription::require("Order", &self.order_id)?;
    if !self.amount.is_finite() || self.amount < 0.0 {
      return Err(ApiError::InvalidInput("Payment amount must be zero or more.".to_string()));
    }
    Ok(())
  }
}
