// storefront/src/config.rs

use crate::error::{ApiError, ApiResult};
use dotenvy::dotenv;
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_HOME_ROUTE: &str = "/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Backend base URL; every resource path is resolved below it.
  pub api_base_url: String,
  pub request_timeout: Duration,
  /// Where the client navigates after the backend rejects the session.
  pub home_route: String,
  pub user_agent: String,
}

impl ClientConfig {
  pub fn new(api_base_url: impl Into<String>) -> Self {
    Self {
      api_base_url: api_base_url.into(),
      request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      home_route: DEFAULT_HOME_ROUTE.to_string(),
      user_agent: format!("storefront/{}", env!("CARGO_PKG_VERSION")),
    }
  }

  pub fn from_env() -> ApiResult<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let api_base_url = get_env("STOREFRONT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let timeout_secs = match get_env("STOREFRONT_HTTP_TIMEOUT_SECS") {
      Some(raw) => raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ApiError::Config(format!("Invalid STOREFRONT_HTTP_TIMEOUT_SECS '{}': {}", raw, e)))?,
      None => DEFAULT_TIMEOUT_SECS,
    };
    let home_route = get_env("STOREFRONT_HOME_ROUTE").unwrap_or_else(|| DEFAULT_HOME_ROUTE.to_string());

    let config = Self {
      request_timeout: Duration::from_secs(timeout_secs),
      home_route,
      ..Self::new(api_base_url)
    };
    config.validate()?;

    tracing::info!(api_base_url = %config.api_base_url, "Client configuration loaded.");
    Ok(config)
  }

  pub fn validate(&self) -> ApiResult<()> {
    let url = Url::parse(&self.api_base_url)
      .map_err(|e| ApiError::Config(format!("Invalid STOREFRONT_API_URL '{}': {}", self.api_base_url, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
      return Err(ApiError::Config(format!(
        "STOREFRONT_API_URL must be an absolute http(s) URL, got '{}'",
        self.api_base_url
      )));
    }
    if self.request_timeout.is_zero() {
      return Err(ApiError::Config("STOREFRONT_HTTP_TIMEOUT_SECS must be greater than zero".to_string()));
    }
    Ok(())
  }
}
