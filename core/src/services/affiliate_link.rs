// storefront/src/services/affiliate_link.rs

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{AffiliateLink, AffiliateLinkInput};
use chrono::Utc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct AffiliateLinkService {
  http: HttpClient,
}

impl AffiliateLinkService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "affiliate_link_service::list", skip(self), err(Display))]
  pub async fn list(&self) -> ApiResult<Vec<AffiliateLink>> {
    self.http.send(ApiRequest::get(&["affiliate-links"])).await
  }

  #[instrument(name = "affiliate_link_service::create", skip(self, input), fields(product_id = %input.product_id), err(Display))]
  pub async fn create(&self, input: &AffiliateLinkInput) -> ApiResult<AffiliateLink> {
    input.validate(Utc::now())?;
    let link: AffiliateLink = self.http.send(ApiRequest::post(&["affiliate-links"]).json(input)?).await?;
    info!(code = %link.code, "Affiliate link created.");
    Ok(link)
  }

  #[instrument(name = "affiliate_link_service::update", skip(self, input), err(Display))]
  pub async fn update(&self, id: &str, input: &AffiliateLinkInput) -> ApiResult<AffiliateLink> {
    input.validate(Utc::now())?;
    self.http.send(ApiRequest::put(&["affiliate-links", id]).json(input)?).await
  }

  /// Disabling is addressed by link code, not id.
  #[instrument(name = "affiliate_link_service::disable", skip(self), err(Display))]
  pub async fn disable(&self, code: &str) -> ApiResult<AffiliateLink> {
    let link: AffiliateLink = self
      .http
      .send(ApiRequest::put(&["affiliate-links", code, "disable"]))
      .await?;
    info!(code = %link.code, "Affiliate link disabled.");
    Ok(link)
  }
}
