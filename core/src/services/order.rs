// storefront/src/services/order.rs

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{BuyNowRequest, CreateOrderRequest, Order, OrderQuery, OrderStatus};
use serde_json::json;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct OrderService {
  http: HttpClient,
}

impl OrderService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "order_service::list", skip(self), err(Display))]
  pub async fn list(&self, query: &OrderQuery) -> ApiResult<Vec<Order>> {
    self.http.send(ApiRequest::get(&["orders"]).query(query.to_pairs())).await
  }

  #[instrument(name = "order_service::get", skip(self), err(Display))]
  pub async fn get(&self, id: &str) -> ApiResult<Order> {
    self.http.send(ApiRequest::get(&["orders", id])).await
  }

  #[instrument(name = "order_service::create", skip(self, request), fields(items = request.items.len()), err(Display))]
  pub async fn create(&self, request: &CreateOrderRequest) -> ApiResult<Order> {
    request.validate()?;
    let order: Order = self.http.send(ApiRequest::post(&["orders"]).json(request)?).await?;
    info!(order_id = %order.id, total = order.total_amount, "Order created.");
    Ok(order)
  }

  #[instrument(name = "order_service::buy_now", skip(self, request), fields(product_id = %request.product_id), err(Display))]
  pub async fn buy_now(&self, request: &BuyNowRequest) -> ApiResult<Order> {
    request.validate()?;
    let order: Order = self.http.send(ApiRequest::post(&["orders", "buy-now"]).json(request)?).await?;
    info!(order_id = %order.id, total = order.total_amount, "Buy-now order created.");
    Ok(order)
  }

  /// Sets any status. Legality of the transition is the backend's call.
  #[instrument(name = "order_service::update_status", skip(self), err(Display))]
  pub async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
    let request = ApiRequest::patch(&["orders", id, "status"])
      .as_admin()
      .json(&json!({ "status": status }))?;
    let order: Order = self.http.send(request).await?;
    info!(order_id = %order.id, status = %order.status, "Order status updated.");
    Ok(order)
  }
}
