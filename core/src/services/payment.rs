// storefront/src/services/payment.rs

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{BankTransferInfo, CreatePaymentRequest, Payment, PaymentStatus};
use serde_json::json;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct PaymentService {
  http: HttpClient,
}

impl PaymentService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "payment_service::list", skip(self), err(Display))]
  pub async fn list(&self) -> ApiResult<Vec<Payment>> {
    self.http.send(ApiRequest::get(&["payments"])).await
  }

  #[instrument(name = "payment_service::get", skip(self), err(Display))]
  pub async fn get(&self, id: &str) -> ApiResult<Payment> {
    self.http.send(ApiRequest::get(&["payments", id])).await
  }

  #[instrument(name = "payment_service::create", skip(self, request), fields(order_id = %request.order_id), err(Display))]
  pub async fn create(&self, request: &CreatePaymentRequest) -> ApiResult<Payment> {
    request.validate()?;
    let payment: Payment = self.http.send(ApiRequest::post(&["payments"]).json(request)?).await?;
    info!(payment_id = %payment.id, method = %payment.payment_method, "Payment created.");
    Ok(payment)
  }

  /// Admin confirmation of a received payment.
  #[instrument(name = "payment_service::approve", skip(self), err(Display))]
  pub async fn approve(&self, id: &str) -> ApiResult<Payment> {
    let payment: Payment = self
      .http
      .send(ApiRequest::patch(&["payments", id, "approve"]).as_admin())
      .await?;
    info!(payment_id = %payment.id, status = %payment.status, "Payment approved.");
    Ok(payment)
  }

  #[instrument(name = "payment_service::submit_bank_transfer", skip(self, info), err(Display))]
  pub async fn submit_bank_transfer(&self, id: &str, info: &BankTransferInfo) -> ApiResult<Payment> {
    info.validate()?;
    self
      .http
      .send(ApiRequest::patch(&["payments", id, "bank-transfer"]).json(info)?)
      .await
  }

  #[instrument(name = "payment_service::update_status", skip(self), err(Display))]
  pub async fn update_status(&self, id: &str, status: PaymentStatus) -> ApiResult<Payment> {
    let request = ApiRequest::patch(&["payments", id, "status"])
      .as_admin()
      .json(&json!({ "status": status }))?;
    self.http.send(request).await
  }
}
