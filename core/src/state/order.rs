// storefront/src/state/order.rs

use crate::error::{ApiError, ApiResult};
use crate::models::{BuyNowRequest, CreateOrderRequest, Order, OrderQuery, OrderStatus};
use crate::services::OrderService;
use crate::state::store::{apply, EntityStore, StoreState};
use tracing::instrument;

/// Orders of the signed-in customer (or all orders, for an admin).
#[derive(Clone)]
pub struct OrderState {
  service: OrderService,
  store: EntityStore<Order>,
}

impl OrderState {
  pub fn new(service: OrderService) -> Self {
    Self {
      service,
      store: EntityStore::new(),
    }
  }

  pub fn store(&self) -> &EntityStore<Order> {
    &self.store
  }

  pub fn snapshot(&self) -> StoreState<Order> {
    self.store.snapshot()
  }

  #[instrument(name = "order_state::fetch_orders", skip(self))]
  pub async fn fetch_orders(&self, query: &OrderQuery) -> ApiResult<Vec<Order>> {
    self.store.track("fetch_orders", self.service.list(query), apply::all).await
  }

  pub async fn fetch_order(&self, id: &str) -> ApiResult<Order> {
    self.store.track("fetch_order", self.service.get(id), apply::current).await
  }

  pub async fn create_order(&self, request: &CreateOrderRequest) -> ApiResult<Order> {
    self.store.track("create_order", self.service.create(request), apply::prepend).await
  }

  pub async fn buy_now(&self, request: &BuyNowRequest) -> ApiResult<Order> {
    self.store.track("buy_now", self.service.buy_now(request), apply::prepend).await
  }

  /// Sends any status. Callers that only offer forward moves use [`OrderState::advance`].
  pub async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
    self
      .store
      .track("update_order_status", self.service.update_status(id, status), apply::replace)
      .await
  }

  /// Moves a known order one step forward along the status line.
  pub async fn advance(&self, id: &str) -> ApiResult<Order> {
    let order = self
      .store
      .find(&id.into())
      .or_else(|| self.store.current().filter(|o| o.id.as_str() == id))
      .ok_or(ApiError::NotFound)?;
    let next = order
      .status
      .next()
      .ok_or_else(|| ApiError::InvalidInput(format!("Order {} is already {}.", order.id, order.status)))?;
    self.update_status(id, next).await
  }
}
