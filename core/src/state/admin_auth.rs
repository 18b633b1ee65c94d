// storefront/src/state/admin_auth.rs

use crate::core::ContextData;
use crate::error::{ApiError, ApiResult};
use crate::models::UserProfile;
use crate::session::{decode_unverified, Session};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{event, instrument, Level};

/// A restored or freshly stored admin login.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
  pub token: String,
  pub user: UserProfile,
  pub expires_at: Option<DateTime<Utc>>,
}

/// Admission check shared by `login` and `restore`. The token must decode
/// and must not be expired. The admin role may come from the user or the claims.
fn admit(token: &str, user: UserProfile, now: DateTime<Utc>) -> ApiResult<AdminSession> {
  let claims = match decode_unverified(token) {
    Ok(claims) => claims,
    Err(e) => {
      event!(Level::DEBUG, error = %e, "Admin token payload is not readable.");
      if !user.is_admin() {
        return Err(ApiError::Forbidden);
      }
      return Err(ApiError::InvalidInput("Admin token is malformed.".to_string()));
    }
  };
  if !(user.is_admin() || claims.is_admin()) {
    return Err(ApiError::Forbidden);
  }
  if claims.is_expired_at(now) {
    return Err(ApiError::SessionExpired);
  }
  Ok(AdminSession {
    token: token.to_string(),
    user,
    expires_at: claims.expires_at(),
  })
}

/// Admin login state, kept apart from the customer session.
///
/// Token claims are read without verifying the signature; they only drive
/// the client-side expiry timer. The backend stays the authority.
#[derive(Clone)]
pub struct AdminAuthState {
  session: Session,
  state: ContextData<Option<AdminSession>>,
}

impl AdminAuthState {
  pub fn new(session: Session) -> Self {
    Self {
      session,
      state: ContextData::new(None),
    }
  }

  pub fn current(&self) -> Option<AdminSession> {
    self.state.snapshot()
  }

  pub fn is_admin(&self) -> bool {
    self.state.read().is_some()
  }

  pub fn expires_at(&self) -> Option<DateTime<Utc>> {
    self.state.read().as_ref().and_then(|s| s.expires_at)
  }

  /// Stores a token obtained from the admin login endpoint.
  #[instrument(name = "admin_auth::login", skip_all, fields(user = %user.email), err(Display))]
  pub fn login(&self, token: &str, user: UserProfile, now: DateTime<Utc>) -> ApiResult<AdminSession> {
    let token = token.trim();
    if token.is_empty() {
      return Err(ApiError::InvalidInput("Admin token is required.".to_string()));
    }
    let admin = admit(token, user, now)?;

    self.session.store_admin(&admin.token, &admin.user)?;
    *self.state.write() = Some(admin.clone());
    event!(Level::INFO, expires_at = ?admin.expires_at, "Admin signed in.");
    Ok(admin)
  }

  /// Re-reads the persisted admin login.
  ///
  /// Anything unusable (malformed token, unreadable user, missing admin role,
  /// expired claim) clears the stored admin state and yields `false`.
  #[instrument(name = "admin_auth::restore", skip(self))]
  pub fn restore(&self, now: DateTime<Utc>) -> bool {
    let Some(token) = self.session.admin_token() else {
      *self.state.write() = None;
      return false;
    };

    let restored = self.validate_stored(&token, now);
    match restored {
      Ok(admin) => {
        *self.state.write() = Some(admin);
        true
      }
      Err(reason) => {
        event!(Level::WARN, reason = %reason, "Stored admin session discarded.");
        self.clear();
        false
      }
    }
  }

  fn validate_stored(&self, token: &str, now: DateTime<Utc>) -> Result<AdminSession, String> {
    let user: UserProfile = self
      .session
      .admin_user_raw()
      .and_then(|raw| serde_json::from_str(&raw).ok())
      .ok_or_else(|| "unreadable admin user".to_string())?;
    admit(token, user, now).map_err(|e| e.to_string())
  }

  /// Delay before the auto-logout timer should fire. `None` when signed out
  /// or when the token carries no expiry.
  pub fn auto_logout_in(&self, now: DateTime<Utc>) -> Option<Duration> {
    let expires_at = self.expires_at()?;
    Some((expires_at - now).to_std().unwrap_or(Duration::ZERO))
  }

  /// Timer tick: signs out once the expiry has passed. Returns `true` if it did.
  pub fn enforce_expiry(&self, now: DateTime<Utc>) -> bool {
    if self.expires_at().is_some_and(|at| at <= now) {
      event!(Level::INFO, "Admin session expired.");
      self.clear();
      return true;
    }
    false
  }

  pub fn logout(&self) -> ApiResult<()> {
    *self.state.write() = None;
    self.session.clear_admin()
  }

  fn clear(&self) {
    *self.state.write() = None;
    if let Err(e) = self.session.clear_admin() {
      event!(Level::WARN, error = %e, "Failed to clear the stored admin session.");
    }
  }
}
