// storefront/src/session/token.rs

//! Best-effort reading of JWT claims.
//!
//! The signature is NOT checked. Claims read here only drive client-side
//! behaviour such as the auto-logout timer; the backend stays the authority.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use crate::models::EntityId;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Token is not a three-part JWT")]
  Malformed,

  #[error("Token payload is not valid base64url: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("Token payload is not valid JSON claims: {0}")]
  Claims(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
  #[serde(default)]
  pub sub: Option<EntityId>,
  #[serde(default, alias = "userId", alias = "_id")]
  pub id: Option<EntityId>,
  #[serde(default)]
  pub role: Option<String>,
  /// Seconds since the epoch.
  #[serde(default, deserialize_with = "epoch_seconds")]
  pub exp: Option<i64>,
  #[serde(default, deserialize_with = "epoch_seconds")]
  pub iat: Option<i64>,
}

/// NumericDate per RFC 7519: integer or fractional seconds. Fractions are
/// truncated.
fn epoch_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
  match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => Ok(None),
    Some(Value::Number(n)) => n
      .as_i64()
      .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
      .map(Some)
      .ok_or_else(|| de::Error::custom(format!("timestamp {} is out of range", n))),
    Some(other) => Err(de::Error::invalid_type(
      de::Unexpected::Other(&other.to_string()),
      &"seconds since the epoch",
    )),
  }
}

impl TokenClaims {
  pub fn expires_at(&self) -> Option<DateTime<Utc>> {
    self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
  }

  pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
    self.expires_at().is_some_and(|expires_at| expires_at <= now)
  }

  pub fn is_admin(&self) -> bool {
    self.role.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("admin"))
  }
}

pub fn decode_unverified(token: &str) -> Result<TokenClaims, TokenError> {
  let mut parts = token.trim().split('.');
  let (Some(_header), Some(payload), Some(_signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
  else {
    return Err(TokenError::Malformed);
  };
  if payload.is_empty() {
    return Err(TokenError::Malformed);
  }
  let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
  Ok(serde_json::from_slice(&bytes)?)
}
