use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the caller by the engine.
///
/// Anomalous data (orphan parent references, cycles, empty aggregation
/// input) is recovered locally and reported through [`HierarchyWarning`]
/// lists or zeroed results instead; these variants are reserved for caller
/// programming errors that must not be silently ignored.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "detail")]
pub enum EngineError {
    #[error("Unknown metric key: {key}")]
    UnknownMetric { key: String },

    #[error("Invalid transition for post {post_id}: {reason}")]
    InvalidTransition { post_id: String, reason: String },

    #[error("Invalid status transition for account {account_id}: {from} -> {to}")]
    InvalidStatusTransition {
        account_id: String,
        from: String,
        to: String,
    },
}

/// Non-fatal anomaly observed while building an account hierarchy.
///
/// The offending account is demoted to a root so the forest stays
/// well-formed; presentation layers render the result unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HierarchyWarning {
    /// `parent_id` did not resolve to any account in the snapshot.
    OrphanParent {
        account_id: String,
        missing_parent_id: String,
    },
    /// The parent chain of this account re-entered itself.
    CycleDetected { account_id: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Value must be non-negative")]
    MustBeNonNegative,

    #[error("Value must be finite")]
    MustBeFinite,

    #[error("Invalid identifier: {0}")]
    InvalidId(String),
}

impl From<ValidationError> for String {
    fn from(error: ValidationError) -> Self {
        error.to_string()
    }
}
