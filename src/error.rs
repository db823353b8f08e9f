//! Custom error types for the bucket planner
//!
//! This module defines the error hierarchy for the planner using thiserror
//! for ergonomic error definitions. Rejected edits are ordinary, recoverable
//! variants; nothing here is fatal.

use thiserror::Error;

/// The main error type for planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Edit targets a bucket id that is not part of the plan
    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    /// Edit targets the locked (data-derived) bucket
    #[error("Bucket '{0}' is locked and cannot be edited")]
    LockedBucketEditAttempt(String),

    /// Duration picker value outside the allowed set
    #[error("Invalid savings duration: {0} (expected 3, 6 or 12 months)")]
    InvalidDuration(String),

    /// Validation errors for plans, buckets and edit input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A plan that does not add up to its income cannot be persisted
    #[error("Plan is not valid: {percentage:.2}% of income allocated")]
    InvalidPlan { percentage: f64 },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PlannerError {
    /// Create an "unknown bucket" error
    pub fn unknown_bucket(id: impl Into<String>) -> Self {
        Self::UnknownBucket(id.into())
    }

    /// Create a "not found" error for saved plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: identifier.into(),
        }
    }

    /// Check if this error is an edit the engine refused
    ///
    /// Rejected edits leave the caller's current plan untouched.
    pub fn is_rejected_edit(&self) -> bool {
        matches!(
            self,
            Self::UnknownBucket(_) | Self::LockedBucketEditAttempt(_) | Self::InvalidDuration(_)
        )
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::LockedBucketEditAttempt("essential".into());
        assert_eq!(
            err.to_string(),
            "Bucket 'essential' is locked and cannot be edited"
        );
    }

    #[test]
    fn test_rejected_edit_classification() {
        assert!(PlannerError::unknown_bucket("nope").is_rejected_edit());
        assert!(PlannerError::InvalidDuration("7".into()).is_rejected_edit());
        assert!(!PlannerError::Validation("bad".into()).is_rejected_edit());
    }

    #[test]
    fn test_invalid_plan_display() {
        let err = PlannerError::InvalidPlan { percentage: 97.5 };
        assert_eq!(err.to_string(), "Plan is not valid: 97.50% of income allocated");
    }

    #[test]
    fn test_not_found_error() {
        let err = PlannerError::plan_not_found("March");
        assert_eq!(err.to_string(), "Plan not found: March");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
