// storefront/src/services/affiliate.rs

use crate::error::ApiResult;
use crate::http::{ApiRequest, HttpClient};
use crate::models::{
  AffiliateLink, AffiliateProfile, AffiliateStats, AffiliateStatus, AffiliateSummary, Commission, PayoutRequest,
  RegisterAffiliateRequest,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct AffiliateService {
  http: HttpClient,
}

impl AffiliateService {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  #[instrument(name = "affiliate_service::register", skip(self, request), err(Display))]
  pub async fn register(&self, request: &RegisterAffiliateRequest) -> ApiResult<AffiliateProfile> {
    request.validate()?;
    let profile: AffiliateProfile = self
      .http
      .send(ApiRequest::post(&["affiliates", "register"]).json(request)?)
      .await?;
    info!(code = %profile.affiliate_code, status = profile.status.as_str(), "Affiliate registered.");
    Ok(profile)
  }

  /// The caller's affiliate profile. `ApiError::NotFound` means "not registered".
  #[instrument(name = "affiliate_service::profile", skip(self), err(Display))]
  pub async fn profile(&self) -> ApiResult<AffiliateProfile> {
    self.http.send(ApiRequest::get(&["affiliates", "profile"])).await
  }

  #[instrument(name = "affiliate_service::stats", skip(self), err(Display))]
  pub async fn stats(&self) -> ApiResult<AffiliateStats> {
    self.http.send(ApiRequest::get(&["affiliates", "stats"])).await
  }

  #[instrument(name = "affiliate_service::request_payout", skip(self, request), fields(amount = request.amount), err(Display))]
  pub async fn request_payout(&self, request: &PayoutRequest) -> ApiResult<()> {
    request.validate()?;
    let _: Value = self
      .http
      .send(ApiRequest::post(&["affiliates", "payout"]).json(request)?)
      .await?;
    info!("Payout requested.");
    Ok(())
  }

  #[instrument(name = "affiliate_service::admin_list", skip(self), err(Display))]
  pub async fn admin_list(&self) -> ApiResult<Vec<AffiliateSummary>> {
    self
      .http
      .send(ApiRequest::get(&["affiliates", "admin", "list"]).as_admin())
      .await
  }

  #[instrument(name = "affiliate_service::admin_detail", skip(self), err(Display))]
  pub async fn admin_detail(&self, id: &str) -> ApiResult<AffiliateProfile> {
    self
      .http
      .send(ApiRequest::get(&["affiliates", "admin", "detail", id]).as_admin())
      .await
  }

  #[instrument(name = "affiliate_service::admin_commissions", skip(self), err(Display))]
  pub async fn admin_commissions(&self, id: &str) -> ApiResult<Vec<Commission>> {
    self
      .http
      .send(ApiRequest::get(&["affiliates", "admin", id, "commissions"]).as_admin())
      .await
  }

  #[instrument(name = "affiliate_service::admin_links", skip(self), err(Display))]
  pub async fn admin_links(&self, id: &str) -> ApiResult<Vec<AffiliateLink>> {
    self
      .http
      .send(ApiRequest::get(&["affiliates", "admin", id, "links"]).as_admin())
      .await
  }

  #[instrument(name = "affiliate_service::admin_set_status", skip(self), fields(status = status.as_str()), err(Display))]
  pub async fn admin_set_status(&self, id: &str, status: AffiliateStatus) -> ApiResult<AffiliateProfile> {
    let request = ApiRequest::patch(&["affiliates", "admin", id, "status"])
      .as_admin()
      .json(&json!({ "status": status }))?;
    let profile: AffiliateProfile = self.http.send(request).await?;
    info!(code = %profile.affiliate_code, status = profile.status.as_str(), "Affiliate status changed.");
    Ok(profile)
  }
}
