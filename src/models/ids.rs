//! Identifier types
//!
//! Saved plans get random UUID identifiers. Buckets are keyed by short,
//! user-facing string ids ("essential", "goal", ...) whose ordering is the
//! residual tie-break, so they are a plain ordered newtype.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a saved plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(Uuid);

impl PlanId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a string, with or without the `plan-` prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let s = s.strip_prefix("plan-").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plan-{}", &self.0.to_string()[..8])
    }
}

/// Identifier of a bucket within a plan
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(String);

impl BucketId {
    /// Create a bucket id; surrounding whitespace is trimmed and case folded
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BucketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl FromStr for BucketId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_id_display() {
        let id = PlanId::new();
        let display = id.to_string();
        assert!(display.starts_with("plan-"));
        assert_eq!(display.len(), 13);
    }

    #[test]
    fn test_plan_id_parse() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = PlanId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);
        assert_eq!(PlanId::parse(&format!("plan-{}", uuid_str)).unwrap(), id);
    }

    #[test]
    fn test_bucket_id_normalized() {
        assert_eq!(BucketId::new("  Goal "), BucketId::from("goal"));
        assert!(BucketId::new("   ").is_empty());
    }

    #[test]
    fn test_bucket_id_ordering() {
        let mut ids = vec![BucketId::new("investments"), BucketId::new("goal")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "goal");
    }
}
