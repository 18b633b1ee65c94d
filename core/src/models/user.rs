// storefront/src/models/user.rs

use super::id::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  #[serde(alias = "_id")]
  pub id: EntityId,
  pub email: String,
  #[serde(default, alias = "fullName")]
  pub name: Option<String>,
  #[serde(default)]
  pub role: Option<String>,
}

impl UserProfile {
  pub fn is_admin(&self) -> bool {
    self.role.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("admin"))
  }

  pub fn display_name(&self) -> &str {
    self.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&self.email)
  }
}
