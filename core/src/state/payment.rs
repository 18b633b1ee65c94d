// storefront/src/state/payment.rs

use crate::error::ApiResult;
use crate::models::{BankTransferInfo, CreatePaymentRequest, Payment, PaymentStatus};
use crate::services::PaymentService;
use crate::state::store::{apply, EntityStore, StoreState};

#[derive(Clone)]
pub struct PaymentState {
  service: PaymentService,
  store: EntityStore<Payment>,
}

impl PaymentState {
  pub fn new(service: PaymentService) -> Self {
    Self {
      service,
      store: EntityStore::new(),
    }
  }

  pub fn store(&self) -> &EntityStore<Payment> {
    &self.store
  }

  pub fn snapshot(&self) -> StoreState<Payment> {
    self.store.snapshot()
  }

  pub async fn fetch_payments(&self) -> ApiResult<Vec<Payment>> {
    self.store.track("fetch_payments", self.service.list(), apply::all).await
  }

  pub async fn fetch_payment(&self, id: &str) -> ApiResult<Payment> {
    self.store.track("fetch_payment", self.service.get(id), apply::current).await
  }

  pub async fn create_payment(&self, request: &CreatePaymentRequest) -> ApiResult<Payment> {
    self.store.track("create_payment", self.service.create(request), apply::prepend).await
  }

  pub async fn approve_payment(&self, id: &str) -> ApiResult<Payment> {
    self.store.track("approve_payment", self.service.approve(id), apply::replace).await
  }

  pub async fn submit_bank_transfer(&self, id: &str, info: &BankTransferInfo) -> ApiResult<Payment> {
    self
      .store
      .track("submit_bank_transfer", self.service.submit_bank_transfer(id, info), apply::replace)
      .await
  }

  pub async fn update_status(&self, id: &str, status: PaymentStatus) -> ApiResult<Payment> {
    self
      .store
      .track("update_payment_status", self.service.update_status(id, status), apply::replace)
      .await
  }
}
