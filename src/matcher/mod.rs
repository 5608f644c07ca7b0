//! Matcher operator tree for sievedb
//!
//! A compiled filter expression is an immutable tree of operator nodes.
//! This module owns the three facets bound to that tree:
//!
//! 1. Construction: validated builders, one per node kind
//! 2. Evaluation: recursive `matches(&Document) -> bool` with the
//!    cross-type coercion matrix
//! 3. Rendering: reconstruction of a filter-shaped document
//!
//! # Invariants
//!
//! - Every path-bearing node carries a non-empty path
//! - The tree is a strict forest: one owner per child, no cycles
//! - Evaluation is pure and never panics on structurally valid input

mod errors;
mod evaluate;
mod ops;
mod render;

pub use errors::{MatcherError, MatcherResult};
pub use ops::{CompareOp, CompareOpcode, LogicalOpcode, MatcherOp};
