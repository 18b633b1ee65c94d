// tests/session_tests.rs
mod common;

use common::*;
use std::path::PathBuf;
use std::sync::Arc;
use storefront::models::UserProfile;
use storefront::session::keys;
use storefront::{ApiError, FileStorage, MemoryStorage, Session, SessionStorage, StorageScope};

fn temp_session_file(name: &str) -> PathBuf {
  let path = std::env::temp_dir().join(format!("storefront-{}-{}.json", name, std::process::id()));
  let _ = std::fs::remove_file(&path);
  path
}

fn customer() -> UserProfile {
  UserProfile {
    id: "u1".into(),
    email: "lan@shop.test".to_string(),
    name: Some("Lan".to_string()),
    role: Some("user".to_string()),
  }
}

#[test]
fn test_token_falls_back_from_session_to_local_scope() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  storage.set(StorageScope::Local, keys::TOKEN, "remembered").unwrap();
  let session = Session::new(storage.clone());
  assert_eq!(session.token().as_deref(), Some("remembered"));

  session.store_token("fresh", false).unwrap();
  assert_eq!(session.token().as_deref(), Some("fresh"));
  assert_eq!(storage.get(StorageScope::Local, keys::TOKEN).as_deref(), Some("remembered"));
}

#[test]
fn test_blank_token_and_referral_code_are_rejected() {
  let session = Session::in_memory();
  assert!(matches!(session.store_token("  ", true), Err(ApiError::InvalidInput(_))));
  assert!(matches!(session.remember_affiliate_code(""), Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_referral_code_is_mirrored_into_every_scope() {
  let storage = Arc::new(MemoryStorage::new());
  let session = Session::new(storage.clone());
  session.remember_affiliate_code(" AFF123 ").unwrap();

  for scope in [StorageScope::Session, StorageScope::Local, StorageScope::Cookie] {
    assert_eq!(storage.get(scope, keys::AFFILIATE_CODE).as_deref(), Some("AFF123"));
  }

  storage.remove(StorageScope::Session, keys::AFFILIATE_CODE).unwrap();
  storage.remove(StorageScope::Local, keys::AFFILIATE_CODE).unwrap();
  assert_eq!(session.affiliate_code().as_deref(), Some("AFF123"));

  session.clear_affiliate_code().unwrap();
  assert_eq!(session.affiliate_code(), None);
}

#[test]
fn test_logout_clears_customer_but_keeps_referral() {
  let session = Session::in_memory();
  session.store_token("t", true).unwrap();
  session.store_user(&customer()).unwrap();
  session.remember_affiliate_code("AFF123").unwrap();

  session.logout().unwrap();

  assert_eq!(session.token(), None);
  assert_eq!(session.user(), None);
  assert_eq!(session.affiliate_code().as_deref(), Some("AFF123"));
}

#[test]
fn test_unreadable_stored_user_reads_as_none() {
  let storage = Arc::new(MemoryStorage::new());
  storage.set(StorageScope::Local, keys::USER, "{not json").unwrap();
  let session = Session::new(storage);
  assert_eq!(session.user(), None);
}

#[test]
fn test_file_storage_persists_local_and_cookie_but_not_session_scope() {
  setup_tracing();
  let path = temp_session_file("persist");
  {
    let session = Session::new(Arc::new(FileStorage::open(&path).unwrap()));
    session.store_token("remembered", true).unwrap();
    session.store_user(&customer()).unwrap();
    session.remember_affiliate_code("AFF123").unwrap();
  }

  let storage = Arc::new(FileStorage::open(&path).unwrap());
  assert_eq!(storage.get(StorageScope::Session, keys::TOKEN), None);
  let session = Session::new(storage);
  assert_eq!(session.token().as_deref(), Some("remembered"));
  assert_eq!(session.user().map(|u| u.email), Some("lan@shop.test".to_string()));
  assert_eq!(session.affiliate_code().as_deref(), Some("AFF123"));

  let _ = std::fs::remove_file(&path);
}

#[test]
fn test_file_storage_missing_or_blank_file_starts_empty() {
  let path = temp_session_file("blank");
  let storage = FileStorage::open(&path).unwrap();
  assert_eq!(storage.get(StorageScope::Local, keys::TOKEN), None);

  std::fs::write(&path, "  \n").unwrap();
  let storage = FileStorage::open(&path).unwrap();
  assert_eq!(storage.get(StorageScope::Cookie, keys::AFFILIATE_CODE), None);

  let _ = std::fs::remove_file(&path);
}

#[test]
fn test_file_storage_rejects_corrupt_file() {
  let path = temp_session_file("corrupt");
  std::fs::write(&path, "{ this is not json").unwrap();

  let err = FileStorage::open(&path).unwrap_err();
  assert!(matches!(err, ApiError::Storage(_)));

  let _ = std::fs::remove_file(&path);
}
