//! Observability for sievedb
//!
//! Structured diagnostics only; the matcher never fails a match walk
//! because of an unloggable event.

mod logger;

pub use logger::{Logger, Severity};
