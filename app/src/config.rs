// storefront-console/src/config.rs

use crate::errors::{ConsoleError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SESSION_FILE: &str = ".storefront-session.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
  /// Where `Local` and `Cookie` session values are persisted between runs.
  pub session_file: PathBuf,
  pub log_format: LogFormat,
}

impl ConsoleConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());

    let session_file = get_env("STOREFRONT_SESSION_FILE").unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
    let log_format = match get_env("STOREFRONT_LOG_FORMAT") {
      Some(raw) => parse_log_format(&raw)?,
      None => LogFormat::default(),
    };

    Ok(Self {
      session_file: PathBuf::from(session_file),
      log_format,
    })
  }
}

fn parse_log_format(raw: &str) -> Result<LogFormat> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "text" => Ok(LogFormat::Text),
    "json" => Ok(LogFormat::Json),
    other => Err(ConsoleError::Config(format!(
      "Invalid STOREFRONT_LOG_FORMAT '{}': expected 'text' or 'json'",
      other
    ))),
  }
}
