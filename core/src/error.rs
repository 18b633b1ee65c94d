// storefront/src/error.rs

//! Error taxonomy shared by every service call.
//!
//! The `Display` output of [`ApiError`] is the message shown to the user.
//! HTTP failures are classified by status code through [`ApiError::from_status`].

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Fixed user-facing messages.
pub mod messages {
  pub const VALIDATION: &str = "The submitted data is invalid. Please check the form and try again.";
  pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
  pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
  pub const NOT_FOUND: &str = "The requested resource was not found.";
  pub const CONFLICT: &str = "This record already exists or conflicts with existing data.";
  pub const SERVER: &str = "The server encountered an error. Please try again later.";
  pub const NETWORK: &str = "Unable to reach the server. Please check your network connection.";
  pub const UNEXPECTED_RESPONSE: &str = "The server returned an unexpected response.";
}

#[derive(Debug, Error)]
pub enum ApiError {
  /// 400 and 422. Carries the server's message when the payload had one.
  #[error("{message}")]
  Validation { status: u16, message: String },

  #[error("{}", messages::SESSION_EXPIRED)]
  SessionExpired,

  #[error("{}", messages::FORBIDDEN)]
  Forbidden,

  #[error("{}", messages::NOT_FOUND)]
  NotFound,

  #[error("{}", messages::CONFLICT)]
  Conflict,

  #[error("{}", messages::SERVER)]
  Server { status: u16 },

  #[error("Request failed with status {status}.")]
  Unexpected { status: u16 },

  /// No response was received at all.
  #[error("{}", messages::NETWORK)]
  Network { detail: String },

  /// A 2xx payload did not match the expected shape.
  #[error("{}", messages::UNEXPECTED_RESPONSE)]
  Decode { endpoint: String, detail: String },

  #[error("{0}")]
  InvalidInput(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Session storage error: {0}")]
  Storage(String),

  #[error("Page flow error: {source}")]
  Pipeline {
    #[from]
    source: PipelineError,
  },
}

impl ApiError {
  /// Maps a non-2xx status (and the optional `message` from its payload) to an error.
  ///
  /// Only validation failures surface the server's text; every other status
  /// shows its fixed message.
  pub fn from_status(status: u16, server_message: Option<&str>) -> Self {
    match status {
      400 | 422 => {
        let message = server_message
          .map(str::trim)
          .filter(|m| !m.is_empty())
          .unwrap_or(messages::VALIDATION)
          .to_string();
        ApiError::Validation { status, message }
      }
      401 => ApiError::SessionExpired,
      403 => ApiError::Forbidden,
      404 => ApiError::NotFound,
      409 => ApiError::Conflict,
      500..=599 => ApiError::Server { status },
      _ => ApiError::Unexpected { status },
    }
  }

  pub fn no_response(detail: impl Into<String>) -> Self {
    ApiError::Network { detail: detail.into() }
  }

  /// HTTP status behind this error, if it came from a response.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Validation { status, .. } => Some(*status),
      ApiError::SessionExpired => Some(401),
      ApiError::Forbidden => Some(403),
      ApiError::NotFound => Some(404),
      ApiError::Conflict => Some(409),
      ApiError::Server { status } | ApiError::Unexpected { status } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ApiError::NotFound)
  }
}

/// Framework errors of the page pipeline engine.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step handler failed. Source: {source}")]
  Handler {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for PipelineError {
  fn from(err: AnyhowError) -> Self {
    PipelineError::Handler { source: err }
  }
}

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;
