// storefront/src/models/id.rs

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Backend identifier.
///
/// The canonical wire shape is a string. Integers are accepted and kept in
/// their decimal form; nested objects are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
  pub fn new(id: impl Into<String>) -> Self {
    EntityId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for EntityId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for EntityId {
  fn from(value: &str) -> Self {
    EntityId(value.to_string())
  }
}

impl From<String> for EntityId {
  fn from(value: String) -> Self {
    EntityId(value)
  }
}

impl AsRef<str> for EntityId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Serialize for EntityId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0)
  }
}

struct EntityIdVisitor;

impl<'de> Visitor<'de> for EntityIdVisitor {
  type Value = EntityId;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a string or integer identifier")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<EntityId, E> {
    if v.trim().is_empty() {
      return Err(E::invalid_value(de::Unexpected::Str(v), &self));
    }
    Ok(EntityId(v.to_string()))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<EntityId, E> {
    Ok(EntityId(v.to_string()))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<EntityId, E> {
    Ok(EntityId(v.to_string()))
  }
}

impl<'de> Deserialize<'de> for EntityId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(EntityIdVisitor)
  }
}

/// Records that the entity stores can match by identifier.
pub trait Identified {
  fn id(&self) -> &EntityId;
}
