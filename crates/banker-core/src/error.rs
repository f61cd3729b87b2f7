//! Error types for scenario analysis.

use thiserror::Error;

/// Result type alias for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors raised before any analysis runs.
///
/// The validator and comparator themselves are total; these only guard the
/// boundary against scenarios whose matrices disagree with their declared
/// dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("malformed scenario: {0}")]
    Malformed(String),

    #[error("scenario shapes differ: {0}")]
    ShapeMismatch(String),
}
