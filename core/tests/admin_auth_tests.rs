// tests/admin_auth_tests.rs
mod common;

use chrono::{Duration, TimeZone, Utc};
use common::*;
use serde_json::json;
use std::sync::Arc;
use storefront::models::{EntityId, UserProfile};
use storefront::session::{decode_unverified, keys, TokenError};
use storefront::state::AdminAuthState;
use storefront::{ApiError, MemoryStorage, Session, SessionStorage, StorageScope};

fn admin_user() -> UserProfile {
  UserProfile {
    id: "adm".into(),
    email: "admin@shop.test".to_string(),
    name: Some("Admin".to_string()),
    role: Some("admin".to_string()),
  }
}

fn now() -> chrono::DateTime<Utc> {
  Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn admin_token(expires_in: Duration) -> String {
  make_token(json!({ "id": "adm", "role": "admin", "exp": (now() + expires_in).timestamp() }))
}

#[test]
fn test_decode_unverified_reads_claims_without_signature_check() {
  let token = make_token(json!({ "userId": "u9", "role": "ADMIN", "exp": 1_800_000_000i64 }));
  let claims = decode_unverified(&token).unwrap();
  assert_eq!(claims.id.as_ref().map(EntityId::as_str), Some("u9"));
  assert!(claims.is_admin());
  assert_eq!(claims.expires_at().map(|t| t.timestamp()), Some(1_800_000_000));

  assert!(matches!(decode_unverified("not-a-jwt"), Err(TokenError::Malformed)));
  assert!(matches!(decode_unverified("a.!!!.c"), Err(TokenError::Base64(_))));
}

#[test]
fn test_claims_accept_numeric_ids_and_fractional_timestamps() {
  let token = make_token(json!({ "sub": 42, "id": 7, "role": "admin", "exp": 1_800_000_000.75, "iat": 1_799_990_000.2 }));
  let claims = decode_unverified(&token).unwrap();
  assert_eq!(claims.sub.as_ref().map(EntityId::as_str), Some("42"));
  assert_eq!(claims.id.as_ref().map(EntityId::as_str), Some("7"));
  assert_eq!(claims.exp, Some(1_800_000_000));
  assert_eq!(claims.iat, Some(1_799_990_000));

  let token = make_token(json!({ "id": 7, "role": "admin", "exp": "soon" }));
  assert!(matches!(decode_unverified(&token), Err(TokenError::Claims(_))));
}

#[test]
fn test_numeric_claims_do_not_block_an_admin_login() {
  setup_tracing();
  let session = Session::in_memory();
  let auth = AdminAuthState::new(session.clone());
  let expires = (now() + Duration::hours(1)).timestamp() as f64 + 0.5;
  let token = make_token(json!({ "id": 7, "role": "admin", "exp": expires }));

  let admin = auth.login(&token, admin_user(), now()).unwrap();
  assert_eq!(admin.expires_at, Some(now() + Duration::hours(1)));
  assert!(AdminAuthState::new(session).restore(now()));
}

#[test]
fn test_malformed_stored_admin_token_clears_state_without_error() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  storage.set(StorageScope::Local, keys::ADMIN_TOKEN, "garbage").unwrap();
  storage
    .set(StorageScope::Local, keys::ADMIN_USER, &serde_json::to_string(&admin_user()).unwrap())
    .unwrap();
  let auth = AdminAuthState::new(Session::new(storage.clone()));

  assert!(!auth.restore(now()));
  assert!(!auth.is_admin());
  assert_eq!(storage.get(StorageScope::Local, keys::ADMIN_TOKEN), None);
  assert_eq!(storage.get(StorageScope::Local, keys::ADMIN_USER), None);
}

#[test]
fn test_restore_rejects_expired_and_non_admin_logins() {
  setup_tracing();
  let session = Session::in_memory();
  let auth = AdminAuthState::new(session.clone());

  session.store_admin(&admin_token(Duration::minutes(-5)), &admin_user()).unwrap();
  assert!(!auth.restore(now()));
  assert_eq!(session.admin_token(), None);

  let customer = UserProfile {
    role: Some("user".to_string()),
    ..admin_user()
  };
  let customer_token = make_token(json!({ "id": "adm", "role": "user" }));
  session.store_admin(&customer_token, &customer).unwrap();
  assert!(!auth.restore(now()));
  assert!(!auth.is_admin());
}

#[test]
fn test_restore_accepts_valid_login_and_schedules_auto_logout() {
  setup_tracing();
  let session = Session::in_memory();
  session.store_admin(&admin_token(Duration::minutes(30)), &admin_user()).unwrap();
  let auth = AdminAuthState::new(session);

  assert!(auth.restore(now()));
  assert!(auth.is_admin());
  assert_eq!(auth.auto_logout_in(now()), Some(std::time::Duration::from_secs(30 * 60)));

  assert!(!auth.enforce_expiry(now() + Duration::minutes(29)));
  assert!(auth.enforce_expiry(now() + Duration::minutes(30)));
  assert!(!auth.is_admin());
}

#[test]
fn test_login_requires_admin_role_and_fresh_token() {
  setup_tracing();
  let session = Session::in_memory();
  let auth = AdminAuthState::new(session.clone());

  let customer = UserProfile {
    role: None,
    ..admin_user()
  };
  let err = auth.login("opaque-token", customer, now()).unwrap_err();
  assert!(matches!(err, ApiError::Forbidden));

  let err = auth
    .login(&admin_token(Duration::seconds(-1)), admin_user(), now())
    .unwrap_err();
  assert!(matches!(err, ApiError::SessionExpired));
  assert_eq!(session.admin_token(), None);

  let admin = auth.login(&admin_token(Duration::hours(1)), admin_user(), now()).unwrap();
  assert_eq!(admin.expires_at, Some(now() + Duration::hours(1)));
  assert!(session.admin_token().is_some());

  auth.logout().unwrap();
  assert!(!auth.is_admin());
  assert_eq!(session.admin_token(), None);
}

#[test]
fn test_accepted_login_survives_a_fresh_restore() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let auth = AdminAuthState::new(Session::new(storage.clone()));
  let admin = auth.login(&admin_token(Duration::hours(2)), admin_user(), now()).unwrap();

  let reopened = AdminAuthState::new(Session::new(storage.clone()));
  assert!(reopened.restore(now() + Duration::minutes(5)));
  assert_eq!(reopened.current(), Some(admin));
  assert_eq!(reopened.expires_at(), Some(now() + Duration::hours(2)));
}

#[test]
fn test_login_refuses_a_token_restore_would_discard() {
  setup_tracing();
  let session = Session::in_memory();
  let auth = AdminAuthState::new(session.clone());

  let err = auth.login("opaque-admin-token", admin_user(), now()).unwrap_err();
  assert!(matches!(err, ApiError::InvalidInput(_)));
  assert_eq!(err.to_string(), "Admin token is malformed.");
  assert!(!auth.is_admin());
  assert_eq!(session.admin_token(), None);
  assert_eq!(session.admin_user_raw(), None);
}

#[tokio::test]
async fn test_admin_unauthorized_clears_admin_slot_only() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("PATCH /payments/p1/approve", 401, json!({}));
  let storefront = signed_in_storefront(&transport, "customer-token");
  storefront.session().store_admin("admin-token", &admin_user()).unwrap();

  let err = storefront.payments().approve("p1").await.unwrap_err();

  assert!(matches!(err, ApiError::SessionExpired));
  assert_eq!(storefront.session().admin_token(), None);
  assert_eq!(storefront.session().token().as_deref(), Some("customer-token"));
  assert_eq!(storefront.session().take_redirect().as_deref(), Some("/"));
}
