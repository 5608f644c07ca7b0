//! Matcher error types
//!
//! Construction is the only fallible surface: evaluation and rendering
//! are total over any tree the constructors hand out.

use thiserror::Error;

/// Result type for matcher operations
pub type MatcherResult<T> = Result<T, MatcherError>;

/// Errors raised while building an operator tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    /// Path-bearing operators require a non-empty field path
    #[error("operator requires a non-empty field path")]
    EmptyPath,

    /// A `$type` check referenced a type code with no known tag
    #[error("unknown scalar type code: {0}")]
    UnknownTypeCode(i32),
}
