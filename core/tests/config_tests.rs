// tests/config_tests.rs
use serial_test::serial;
use std::env;
use std::time::Duration;
use storefront::config::{DEFAULT_API_URL, DEFAULT_HOME_ROUTE};
use storefront::{ApiError, ClientConfig};

const VARS: [&str; 3] = ["STOREFRONT_API_URL", "STOREFRONT_HTTP_TIMEOUT_SECS", "STOREFRONT_HOME_ROUTE"];

fn clear_vars() {
  for var in VARS {
    env::remove_var(var);
  }
}

#[test]
#[serial]
fn test_defaults_apply_when_unset() {
  clear_vars();
  let config = ClientConfig::from_env().unwrap();
  assert_eq!(config.api_base_url, DEFAULT_API_URL);
  assert_eq!(config.home_route, DEFAULT_HOME_ROUTE);
  assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_env_overrides_are_read() {
  clear_vars();
  env::set_var("STOREFRONT_API_URL", "https://api.shop.test/api");
  env::set_var("STOREFRONT_HTTP_TIMEOUT_SECS", "5");
  env::set_var("STOREFRONT_HOME_ROUTE", "/login");

  let config = ClientConfig::from_env().unwrap();
  assert_eq!(config.api_base_url, "https://api.shop.test/api");
  assert_eq!(config.request_timeout, Duration::from_secs(5));
  assert_eq!(config.home_route, "/login");
  clear_vars();
}

#[test]
#[serial]
fn test_invalid_values_name_the_variable() {
  clear_vars();
  env::set_var("STOREFRONT_HTTP_TIMEOUT_SECS", "soon");
  match ClientConfig::from_env() {
    Err(ApiError::Config(msg)) => assert!(msg.contains("STOREFRONT_HTTP_TIMEOUT_SECS")),
    other => panic!("Expected config error, got {:?}", other),
  }

  clear_vars();
  env::set_var("STOREFRONT_API_URL", "not a url");
  match ClientConfig::from_env() {
    Err(ApiError::Config(msg)) => assert!(msg.contains("STOREFRONT_API_URL")),
    other => panic!("Expected config error, got {:?}", other),
  }
  clear_vars();
}

#[test]
fn test_zero_timeout_is_rejected() {
  let mut config = ClientConfig::new("http://localhost:5000/api");
  config.request_timeout = Duration::ZERO;
  assert!(matches!(config.validate(), Err(ApiError::Config(_))));
}
