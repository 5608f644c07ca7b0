//! Document value model for sievedb
//!
//! Typed field values, insertion-ordered documents with dotted-path
//! lookup, and an incremental builder for output documents. The matcher
//! consumes this module read-only during evaluation and writes through
//! the builder during rendering.

mod builder;
mod document;
mod value;

pub use builder::DocumentBuilder;
pub use document::Document;
pub use value::{FieldValue, ScalarType};
