// storefront/src/services/subscription.rs

//! Admin CRUD for subscription plans and their priced durations.

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{SubscriptionDuration, SubscriptionDurationInput, SubscriptionType, SubscriptionTypeInput};
use serde_json::Value;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct SubscriptionTypeService {
  http: HttpClient,
}

impl SubscriptionTypeService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "subscription_type_service::list", skip(self), err(Display))]
  pub async fn list(&self, product_id: Option<&str>) -> ApiResult<Vec<SubscriptionType>> {
    let mut request = ApiRequest::get(&["subscription-types"]);
    if let Some(product_id) = product_id {
      request = request.param("productId", product_id);
    }
    self.http.send(request).await
  }

  #[instrument(name = "subscription_type_service::create", skip(self, input), err(Display))]
  pub async fn create(&self, input: &SubscriptionTypeInput) -> ApiResult<SubscriptionType> {
    input.validate()?;
    let created: SubscriptionType = self
      .http
      .send(ApiRequest::post(&["subscription-types"]).as_admin().json(input)?)
      .await?;
    info!(id = %created.id, "Subscription type created.");
    Ok(created)
  }

  #[instrument(name = "subscription_type_service::update", skip(self, input), err(Display))]
  pub async fn update(&self, id: &str, input: &SubscriptionTypeInput) -> ApiResult<SubscriptionType> {
    input.validate()?;
    self
      .http
      .send(ApiRequest::put(&["subscription-types", id]).as_admin().json(input)?)
      .await
  }

  #[instrument(name = "subscription_type_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: &str) -> ApiResult<()> {
    let _: Value = self.http.send(ApiRequest::delete(&["subscription-types", id]).as_admin()).await?;
    info!(id, "Subscription type deleted.");
    Ok(())
  }
}

#[derive(Clone)]
pub struct SubscriptionDurationService {
  http: HttpClient,
}

impl SubscriptionDurationService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "subscription_duration_service::list", skip(self), err(Display))]
  pub async fn list(
    &self,
    product_id: Option<&str>,
    subscription_type_id: Option<&str>,
  ) -> ApiResult<Vec<SubscriptionDuration>> {
    let mut request = ApiRequest::get(&["subscription-durations"]);
    if let Some(product_id) = product_id {
      request = request.param("productId", product_id);
    }
    if let Some(type_id) = subscription_type_id {
      request = request.param("subscriptionTypeId", type_id);
    }
    self.http.send(request).await
  }

  #[instrument(name = "subscription_duration_service::create", skip(self, input), err(Display))]
  pub async fn create(&self, input: &SubscriptionDurationInput) -> ApiResult<SubscriptionDuration> {
    input.validate()?;
    let created: SubscriptionDuration = self
      .http
      .send(ApiRequest::post(&["subscription-durations"]).as_admin().json(input)?)
      .await?;
    info!(id = %created.id, days = created.days, "Subscription duration created.");
    Ok(created)
  }

  #[instrument(name = "subscription_duration_service::update", skip(self, input), err(Display))]
  pub async fn update(&self, id: &str, input: &SubscriptionDurationInput) -> ApiResult<SubscriptionDuration> {
    input.validate()?;
    self
      .http
      .send(ApiRequest::put(&["subscription-durations", id]).as_admin().json(input)?)
      .await
  }

  #[instrument(name = "subscription_duration_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: &str) -> ApiResult<()> {
    let _: Value = self
      .http
      .send(ApiRequest::delete(&["subscription-durations", id]).as_admin())
      .await?;
    info!(id, "Subscription duration deleted.");
    Ok(())
  }
}
