// storefront/src/http/request.rs

use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Post => "POST",
      Method::Put => "PUT",
      Method::Patch => "PATCH",
      Method::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which stored token authenticates the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credential {
  #[default]
  Customer,
  /// Admin dashboard calls. Falls back to the customer token when no admin token is stored.
  Admin,
}

/// A request relative to the backend base URL.
///
/// The path is kept as raw segments; the transport percent-encodes each one.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub segments: Vec<String>,
  pub query: Vec<(String, String)>,
  pub body: Option<serde_json::Value>,
  pub credential: Credential,
  /// Filled in by `HttpClient` just before sending.
  pub bearer: Option<String>,
}

impl ApiRequest {
  pub fn new(method: Method, segments: &[&str]) -> Self {
    Self {
      method,
      segments: segments.iter().map(|s| s.to_string()).collect(),
      query: Vec::new(),
      body: None,
      credential: Credential::Customer,
      bearer: None,
    }
  }

  pub fn get(segments: &[&str]) -> Self {
    Self::new(Method::Get, segments)
  }

  pub fn post(segments: &[&str]) -> Self {
    Self::new(Method::Post, segments)
  }

  pub fn put(segments: &[&str]) -> Self {
    Self::new(Method::Put, segments)
  }

  pub fn patch(segments: &[&str]) -> Self {
    Self::new(Method::Patch, segments)
  }

  pub fn delete(segments: &[&str]) -> Self {
    Self::new(Method::Delete, segments)
  }

  pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
    self.query.extend(pairs);
    self
  }

  pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
    self.query.push((key.to_string(), value.into()));
    self
  }

  pub fn json<B: Serialize>(mut self, body: &B) -> ApiResult<Self> {
    let value = serde_json::to_value(body)
      .map_err(|e| ApiError::InvalidInput(format!("Request body could not be encoded: {}", e)))?;
    self.body = Some(value);
    Ok(self)
  }

  pub fn as_admin(mut self) -> Self {
    self.credential = Credential::Admin;
    self
  }

  /// `/orders/42/status` style path for logs and error context.
  pub fn path(&self) -> String {
    format!("/{}", self.segments.join("/"))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

impl ApiResponse {
  pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}
