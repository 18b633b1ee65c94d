// storefront/src/client.rs

use crate::catalog::{CatalogFilter, CatalogView};
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::http::{HttpClient, ReqwestTransport, Transport};
use crate::pages::{self, AffiliateAccess, CheckoutOutcome, CheckoutRequest};
use crate::services::{
  AffiliateLinkService, AffiliateService, OrderService, PaymentService, ProductService, SubscriptionDurationService,
  SubscriptionTypeService,
};
use crate::session::{Session, SessionStorage};
use crate::state::{AdminAuthState, AffiliateLinkState, OrderState, PaymentState};
use std::sync::Arc;
use tracing::info;

/// Entry point: one shared HTTP client, one session, every service.
#[derive(Clone)]
pub struct Storefront {
  config: ClientConfig,
  http: HttpClient,
  products: ProductService,
  subscription_types: SubscriptionTypeService,
  subscription_durations: SubscriptionDurationService,
  orders: OrderService,
  payments: PaymentService,
  affiliates: AffiliateService,
  affiliate_links: AffiliateLinkService,
}

impl Storefront {
  /// Builds a client that talks to `config.api_base_url` over HTTP.
  pub fn connect(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> ApiResult<Self> {
    let transport = ReqwestTransport::new(&config)?;
    info!(api_base_url = %config.api_base_url, "Storefront client ready.");
    Ok(Self::with_transport(config, Arc::new(transport), Session::new(storage)))
  }

  pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>, session: Session) -> Self {
    let http = HttpClient::new(transport, session, config.home_route.clone());
    Self {
      products: ProductService::new(http.clone()),
      subscription_types: SubscriptionTypeService::new(http.clone()),
      subscription_durations: SubscriptionDurationService::new(http.clone()),
      orders: OrderService::new(http.clone()),
      payments: PaymentService::new(http.clone()),
      affiliates: AffiliateService::new(http.clone()),
      affiliate_links: AffiliateLinkService::new(http.clone()),
      http,
      config,
    }
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  pub fn session(&self) -> &Session {
    self.http.session()
  }

  pub fn products(&self) -> &ProductService {
    &self.products
  }

  pub fn subscription_types(&self) -> &SubscriptionTypeService {
    &self.subscription_types
  }

  pub fn subscription_durations(&self) -> &SubscriptionDurationService {
    &self.subscription_durations
  }

  pub fn orders(&self) -> &OrderService {
    &self.orders
  }

  pub fn payments(&self) -> &PaymentService {
    &self.payments
  }

  pub fn affiliates(&self) -> &AffiliateService {
    &self.affiliates
  }

  pub fn affiliate_links(&self) -> &AffiliateLinkService {
    &self.affiliate_links
  }

  // --- Stores. Each call returns a fresh, empty store. ---

  pub fn order_state(&self) -> OrderState {
    OrderState::new(self.orders.clone())
  }

  pub fn payment_state(&self) -> PaymentState {
    PaymentState::new(self.payments.clone())
  }

  pub fn affiliate_link_state(&self) -> AffiliateLinkState {
    AffiliateLinkState::new(self.affiliate_links.clone())
  }

  pub fn admin_auth(&self) -> AdminAuthState {
    AdminAuthState::new(self.session().clone())
  }

  // --- Pages ---

  pub async fn catalog(&self, filter: CatalogFilter) -> ApiResult<CatalogView> {
    pages::load_catalog(&self.products, filter).await
  }

  pub async fn affiliate_access(&self) -> ApiResult<AffiliateAccess> {
    pages::load_affiliate_access(self.session(), &self.affiliates, &self.affiliate_links).await
  }

  pub async fn checkout(
    &self,
    orders: &OrderState,
    payments: &PaymentState,
    request: CheckoutRequest,
  ) -> ApiResult<CheckoutOutcome> {
    pages::run_checkout(self.session(), orders, payments, request).await
  }
}
