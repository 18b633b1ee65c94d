// storefront/src/models/order.rs

use super::id::{EntityId, Identified};
use super::payment::PaymentMethod;
use super::subscription::require;
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle as defined by the backend.
///
/// The backend walks `Pending -> Processing -> Shipped -> Delivered`, or moves
/// to `Cancelled` from any non-terminal state. The client does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Pending,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  /// Every status, in the order a raw status selector lists them.
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  /// Forward step offered by the "next step" action.
  pub fn next(self) -> Option<OrderStatus> {
    match self {
      OrderStatus::Pending => Some(OrderStatus::Processing),
      OrderStatus::Processing => Some(OrderStatus::Shipped),
      OrderStatus::Shipped => Some(OrderStatus::Delivered),
      OrderStatus::Delivered | OrderStatus::Cancelled => None,
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "PENDING",
      OrderStatus::Processing => "PROCESSING",
      OrderStatus::Shipped => "SHIPPED",
      OrderStatus::Delivered => "DELIVERED",
      OrderStatus::Cancelled => "CANCELLED",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for OrderStatus {
  type Err = ApiError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    OrderStatus::ALL
      .into_iter()
      .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| ApiError::InvalidInput(format!("Unknown order status '{}'.", s)))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  #[serde(alias = "product")]
  pub product_id: EntityId,
  #[serde(default)]
  pub product_name: Option<String>,
  #[serde(default)]
  pub subscription_duration_id: Option<EntityId>,
  pub quantity: u32,
  pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
  pub full_name: String,
  pub phone: String,
  #[serde(default)]
  pub email: Option<String>,
  pub address: String,
  #[serde(default)]
  pub city: Option<String>,
  #[serde(default)]
  pub note: Option<String>,
}

impl ShippingAddress {
  pub fn validate(&self) -> ApiResult<()> {
    require("Full name", &self.full_name)?;
    require("Phone", &self.phone)?;
    require("Address", &self.address)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  #[serde(alias = "_id")]
  pub id: EntityId,
  #[serde(alias = "user")]
  pub user_id: EntityId,
  #[serde(default)]
  pub items: Vec<OrderItem>,
  pub status: OrderStatus,
  pub total_amount: f64,
  #[serde(default)]
  pub affiliate_code: Option<String>,
  #[serde(default)]
  pub shipping_address: Option<ShippingAddress>,
  #[serde(default)]
  pub payment_method: Option<PaymentMethod>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Order {
  fn id(&self) -> &EntityId {
    &self.id
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
  pub product_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subscription_duration_id: Option<String>,
  pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
  pub items: Vec<OrderItemInput>,
  pub shipping_address: ShippingAddress,
  pub payment_method: PaymentMethod,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affiliate_code: Option<String>,
}

impl CreateOrderRequest {
  pub fn validate(&self) -> ApiResult<()> {
    if self.items.is_empty() {
      return Err(ApiError::InvalidInput("The cart is empty.".to_string()));
    }
    for item in &self.items {
      require("Product", &item.product_id)?;
      if item.quantity == 0 {
        return Err(ApiError::InvalidInput("Quantity must be at least 1.".to_string()));
      }
    }
    self.shipping_address.validate()
  }
}

/// Single-product purchase that skips the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyNowRequest {
  pub product_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subscription_duration_id: Option<String>,
  pub quantity: u32,
  pub shipping_address: ShippingAddress,
  pub payment_method: PaymentMethod,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub affiliate_code: Option<String>,
}

impl BuyNowRequest {
  pub fn validate(&self) -> ApiResult<()> {
    require("Product", &self.product_id)?;
    if self.quantity == 0 {
      return Err(ApiError::InvalidInput("Quantity must be at least 1.".to_string()));
    }
    self.shipping_address.validate()
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQuery {
  pub status: Option<OrderStatus>,
  pub page: Option<u32>,
  pub limit: Option<u32>,
}

impl OrderQuery {
  pub fn to_pairs(&self) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(status) = self.status {
      pairs.push(("status".to_string(), status.as_str().to_string()));
    }
    if let Some(page) = self.page {
      pairs.push(("page".to_string(), page.to_string()));
    }
    if let Some(limit) = self.limit {
      pairs.push(("limit".to_string(), limit.to_string()));
    }
    pairs
  }
}
