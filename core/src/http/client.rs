// storefront/src/http/client.rs

use crate::error::{ApiError, ApiResult};
use crate::http::request::{ApiRequest, ApiResponse, Credential};
use crate::http::transport::Transport;
use crate::session::Session;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{event, instrument, Level};

struct HttpClientInner {
  transport: Arc<dyn Transport>,
  session: Session,
  home_route: String,
}

/// Request-issuing object shared by every service.
///
/// Attaches the stored bearer token, decodes successful payloads and turns
/// failures into [`ApiError`]. A 401 clears the rejected credentials and
/// schedules navigation to the home route. Nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
  inner: Arc<HttpClientInner>,
}

impl HttpClient {
  pub fn new(transport: Arc<dyn Transport>, session: Session, home_route: impl Into<String>) -> Self {
    Self {
      inner: Arc::new(HttpClientInner {
        transport,
        session,
        home_route: home_route.into(),
      }),
    }
  }

  pub fn session(&self) -> &Session {
    &self.inner.session
  }

  fn bearer_for(&self, credential: Credential) -> Option<String> {
    let session = &self.inner.session;
    match credential {
      Credential::Customer => session.token(),
      Credential::Admin => session.admin_token().or_else(|| session.token()),
    }
  }

  /// Sends `request` and decodes the payload into `T`.
  #[instrument(
    name = "HttpClient::send",
    skip_all,
    fields(method = %request.method, path = %request.path(), status = tracing::field::Empty),
    err(Display)
  )]
  pub async fn send<T: DeserializeOwned>(&self, mut request: ApiRequest) -> ApiResult<T> {
    let path = request.path();
    let credential = request.credential;
    request.bearer = self.bearer_for(credential);

    let started = Instant::now();
    let response = self.inner.transport.execute(request).await.map_err(|e| {
      event!(Level::WARN, error = %e, "Request failed without a response.");
      ApiError::no_response(e.0)
    })?;
    tracing::Span::current().record("status", response.status);
    event!(
      Level::DEBUG,
      elapsed_ms = started.elapsed().as_millis() as u64,
      bytes = response.body.len(),
      "Response received."
    );

    if response.is_success() {
      return decode_payload(&path, &response.body);
    }

    if response.status == 401 {
      self.handle_unauthorized(credential);
      return Err(ApiError::SessionExpired);
    }

    let server_message = server_message(&response);
    let error = ApiError::from_status(response.status, server_message.as_deref());
    event!(Level::WARN, status = response.status, error = %error, "Request rejected.");
    Err(error)
  }

  fn handle_unauthorized(&self, credential: Credential) {
    let session = &self.inner.session;
    if credential == Credential::Admin && session.admin_token().is_some() {
      if let Err(e) = session.clear_admin() {
        event!(Level::WARN, error = %e, "Failed to clear the rejected admin session.");
      }
      session.schedule_redirect(&self.inner.home_route);
      return;
    }
    session.expire(&self.inner.home_route);
  }
}

/// Keys that may sit next to `data` in a response envelope.
const ENVELOPE_KEYS: &[&str] = &[
  "success", "message", "status", "error", "code", "meta", "pagination", "total", "page", "limit", "count",
];

/// `true` when `map` wraps its payload under `data` rather than being an
/// entity that happens to have a `data` field.
fn is_envelope(map: &Map<String, Value>) -> bool {
  map.contains_key("data") && map.keys().all(|k| k == "data" || ENVELOPE_KEYS.contains(&k.as_str()))
}

fn id_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Folds `id` into `_id` wherever an object carries both, recursively.
/// The two must name the same identifier.
fn merge_duplicate_ids(value: &mut Value) -> Result<(), String> {
  match value {
    Value::Object(map) => {
      if let (Some(raw), Some(virtual_id)) = (map.get("_id"), map.get("id")) {
        let same = raw == virtual_id || id_text(raw).is_some_and(|r| Some(r) == id_text(virtual_id));
        if !same {
          return Err(format!("conflicting identifiers _id={} and id={}", raw, virtual_id));
        }
        map.remove("id");
      }
      map.values_mut().try_for_each(merge_duplicate_ids)
    }
    Value::Array(items) => items.iter_mut().try_for_each(merge_duplicate_ids),
    _ => Ok(()),
  }
}

/// Decodes a 2xx body.
///
/// The value is accepted either bare or wrapped in an envelope object under
/// `data`. An object is only treated as an envelope when `data` sits next to
/// envelope keys alone (`success`, `message`, ...). Objects carrying both
/// `_id` and `id` are accepted when the two agree. An empty body decodes as
/// `null`. Anything else that does not match `T` is a [`ApiError::Decode`].
pub fn decode_payload<T: DeserializeOwned>(path: &str, body: &[u8]) -> ApiResult<T> {
  let decode_err = |detail: String| {
    event!(Level::ERROR, path, %detail, "Response payload rejected.");
    ApiError::Decode {
      endpoint: path.to_string(),
      detail,
    }
  };

  let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
    Value::Null
  } else {
    serde_json::from_slice(body).map_err(|e| decode_err(format!("body is not JSON: {}", e)))?
  };

  let mut payload = match value {
    Value::Object(mut map) if is_envelope(&map) => map.remove("data").unwrap_or(Value::Null),
    other => other,
  };
  merge_duplicate_ids(&mut payload).map_err(decode_err)?;
  serde_json::from_value(payload).map_err(|e| decode_err(e.to_string()))
}

fn server_message(response: &ApiResponse) -> Option<String> {
  let value: Value = serde_json::from_slice(&response.body).ok()?;
  ["message", "error"]
    .iter()
    .find_map(|key| value.get(*key).and_then(Value::as_str))
    .map(str::to_string)
}
