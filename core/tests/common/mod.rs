// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use storefront::http::{ApiRequest, ApiResponse, Transport, TransportError};
use storefront::{ClientConfig, Session, Storefront};
use tracing::Level;

// --- Scripted transport ---

#[derive(Debug, Clone)]
pub enum Scripted {
  Respond(u16, String),
  RespondAfter(Duration, u16, String),
  NoResponse(String),
}

/// Fake backend: answers from per-route queues and records every request.
///
/// Routes are keyed by `"METHOD /path"`. The last queued answer of a route
/// is reused once the queue is down to one entry. Unscripted routes get no
/// response at all.
#[derive(Default)]
pub struct ScriptedTransport {
  routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
  requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn respond(&self, route: &str, status: u16, body: Value) {
    self.push(route, Scripted::Respond(status, body.to_string()));
  }

  pub fn respond_raw(&self, route: &str, status: u16, body: &str) {
    self.push(route, Scripted::Respond(status, body.to_string()));
  }

  /// Queues an answer that arrives only after `delay`.
  pub fn respond_after(&self, route: &str, delay: Duration, status: u16, body: Value) {
    self.push(route, Scripted::RespondAfter(delay, status, body.to_string()));
  }

  pub fn fail(&self, route: &str, detail: &str) {
    self.push(route, Scripted::NoResponse(detail.to_string()));
  }

  fn push(&self, route: &str, answer: Scripted) {
    self.routes.lock().entry(route.to_string()).or_default().push_back(answer);
  }

  pub fn requests(&self) -> Vec<ApiRequest> {
    self.requests.lock().clone()
  }

  pub fn request_count(&self) -> usize {
    self.requests.lock().len()
  }

  pub fn last_request(&self) -> Option<ApiRequest> {
    self.requests.lock().last().cloned()
  }

  pub fn requests_to(&self, route: &str) -> Vec<ApiRequest> {
    self
      .requests
      .lock()
      .iter()
      .filter(|r| route_key(r) == route)
      .cloned()
      .collect()
  }
}

fn route_key(request: &ApiRequest) -> String {
  format!("{} {}", request.method, request.path())
}

#[async_trait]
impl Transport for ScriptedTransport {
  async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
    let key = route_key(&request);
    self.requests.lock().push(request);

    let answer = {
      let mut routes = self.routes.lock();
      match routes.get_mut(&key) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
      }
    };
    match answer {
      Some(Scripted::Respond(status, body)) => Ok(ApiResponse::new(status, body.into_bytes())),
      Some(Scripted::RespondAfter(delay, status, body)) => {
        tokio::time::sleep(delay).await;
        Ok(ApiResponse::new(status, body.into_bytes()))
      }
      Some(Scripted::NoResponse(detail)) => Err(TransportError(detail)),
      None => Err(TransportError(format!("no scripted answer for {}", key))),
    }
  }
}

// --- Client wiring ---

pub fn test_config() -> ClientConfig {
  ClientConfig::new("http://backend.test/api")
}

pub fn storefront_with(transport: &Arc<ScriptedTransport>) -> Storefront {
  Storefront::with_transport(test_config(), transport.clone(), Session::in_memory())
}

pub fn signed_in_storefront(transport: &Arc<ScriptedTransport>, token: &str) -> Storefront {
  let storefront = storefront_with(transport);
  storefront.session().store_token(token, true).unwrap();
  storefront
}

// --- Tokens ---

/// Unsigned JWT-shaped token carrying `claims`.
pub fn make_token(claims: Value) -> String {
  let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
  let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
  format!("{}.{}.signature", header, payload)
}

// --- Fixtures ---

pub fn order_json(id: &str, status: &str) -> Value {
  serde_json::json!({
    "_id": id,
    "userId": "u1",
    "items": [{ "productId": "p1", "productName": "Netflix Premium", "quantity": 1, "price": 180000 }],
    "status": status,
    "totalAmount": 180000,
    "paymentMethod": "BANK_TRANSFER",
    "createdAt": "2026-01-05T10:00:00Z"
  })
}

pub fn payment_json(id: &str, order_id: &str, status: &str) -> Value {
  serde_json::json!({
    "_id": id,
    "orderId": order_id,
    "amount": 180000,
    "status": status,
    "paymentMethod": "BANK_TRANSFER"
  })
}

pub fn link_json(id: &str, code: &str, status: &str, expires_at: Option<&str>) -> Value {
  serde_json::json!({
    "_id": id,
    "affiliateId": "a1",
    "productId": "p1",
    "code": code,
    "shortUrl": format!("https://shop.test/r/{}", code),
    "expiresAt": expires_at,
    "clicks": 40,
    "conversions": 4,
    "commissionEarned": 72000,
    "status": status
  })
}

pub fn profile_json(status: &str) -> Value {
  serde_json::json!({
    "_id": "a1",
    "userId": "u1",
    "affiliateCode": "AFF123",
    "commissionRate": 10,
    "totalEarnings": 500000,
    "pendingEarnings": 100000,
    "paidEarnings": 400000,
    "totalReferrals": 12,
    "successfulReferrals": 5,
    "status": status
  })
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
