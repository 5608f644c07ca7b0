//! sievedb - A client-side document predicate matcher
//!
//! Evaluates compiled filter operator trees against structured documents.

pub mod document;
pub mod matcher;
pub mod observability;
