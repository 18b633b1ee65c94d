// storefront-console/src/errors.rs

use storefront::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
  #[error("{0}")]
  Usage(String),

  #[error("Invalid argument '{name}': {detail}")]
  InvalidArgument { name: &'static str, detail: String },

  #[error("Configuration error: {0}")]
  Config(String),

  /// Service failures print their own user-facing message unchanged.
  #[error(transparent)]
  Api(#[from] ApiError),
}

impl ConsoleError {
  pub fn invalid(name: &'static str, detail: impl Into<String>) -> Self {
    ConsoleError::InvalidArgument {
      name,
      detail: detail.into(),
    }
  }
}

pub type Result<T, E = ConsoleError> = std::result::Result<T, E>;
