// storefront/src/http/transport.rs

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::request::{ApiRequest, ApiResponse, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use thiserror::Error;
use tracing::{event, Level};

/// No response was received for a request.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one request and hands back whatever the server answered.
///
/// Any response, whatever its status, is `Ok`. `Err` means nothing came back.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct ReqwestTransport {
  client: reqwest::Client,
  base_url: Url,
}

impl ReqwestTransport {
  pub fn new(config: &ClientConfig) -> ApiResult<Self> {
    config.validate()?;
    let base_url = Url::parse(&config.api_base_url)
      .map_err(|e| ApiError::Config(format!("Invalid STOREFRONT_API_URL: {}", e)))?;
    let client = reqwest::Client::builder()
      .timeout(config.request_timeout)
      .user_agent(config.user_agent.clone())
      .build()
      .map_err(|e| ApiError::Config(format!("HTTP client could not be built: {}", e)))?;
    Ok(Self { client, base_url })
  }

  fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
    let mut url = self.base_url.clone();
    {
      let mut segments = url
        .path_segments_mut()
        .map_err(|_| TransportError(format!("Base URL {} cannot hold a path", self.base_url)))?;
      segments.pop_if_empty();
      segments.extend(request.segments.iter());
    }
    if !request.query.is_empty() {
      url.query_pairs_mut().extend_pairs(request.query.iter());
    }
    Ok(url)
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    let url = self.url_for(&request)?;
    let method = match request.method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
      Method::Put => reqwest::Method::PUT,
      Method::Patch => reqwest::Method::PATCH,
      Method::Delete => reqwest::Method::DELETE,
    };

    let mut builder = self
      .client
      .request(method, url)
      .header(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = &request.bearer {
      builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    if let Some(body) = &request.body {
      builder = builder.json(body);
    }

    let response = builder.send().await.map_err(|e| {
      event!(Level::WARN, error = %e, path = %request.path(), "No response received.");
      TransportError(e.to_string())
    })?;
    let status = response.status().as_u16();
    let body = response
      .bytes()
      .await
      .map_err(|e| TransportError(format!("Response body was cut off: {}", e)))?;
    Ok(ApiResponse::new(status, body.to_vec()))
  }
}
