//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Property identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. Property ids are assigned by the external
/// listing-management subsystem and treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(String);

impl PropertyId {
    /// Create a new `PropertyId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the property ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PropertyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Amenity identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmenityId(String);

impl AmenityId {
    /// Create a new `AmenityId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the amenity ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AmenityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AmenityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AmenityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a built cluster of similar properties.
///
/// Generated as UUID v4 when a cluster is assembled. Clusters are derived
/// data, so these ids are not stable across rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterId(String);

impl ClusterId {
    /// Create a new `ClusterId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the cluster ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClusterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ClusterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ClusterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_id_new_and_as_str() {
        let id = PropertyId::new("prop-1");
        assert_eq!(id.as_str(), "prop-1");
    }

    #[test]
    fn property_id_display() {
        let id = PropertyId::new("display-test");
        assert_eq!(format!("{}", id), "display-test");
    }

    #[test]
    fn property_id_orders_lexicographically() {
        let a = PropertyId::new("a");
        let b = PropertyId::new("b");
        assert!(a < b);
    }

    #[test]
    fn amenity_id_from_str() {
        let id = AmenityId::from("am-7");
        assert_eq!(id.as_str(), "am-7");
    }

    #[test]
    fn cluster_id_generates_unique_ids() {
        let id1 = ClusterId::new();
        let id2 = ClusterId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn cluster_id_as_str_returns_uuid_format() {
        let id = ClusterId::new();
        assert_eq!(id.as_str().len(), 36);
        assert!(id.as_str().chars().filter(|c| *c == '-').count() == 4);
    }

    #[test]
    fn cluster_id_from_string() {
        let id = ClusterId::from("existing-cluster".to_string());
        assert_eq!(id.as_str(), "existing-cluster");
    }
}
