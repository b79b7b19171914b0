//! Core types for Logsieve.
//!
//! This crate provides:
//! - [`Error`] - Rich error types for rulebase loading
//! - [`Diagnostics`] - Per-context debug/error handler pairs
//! - [`Record`] - The output record type plus capture helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diag;
pub mod error;
pub mod record;

// Re-export primary types at crate root for convenience
pub use diag::{DebugHandler, Diagnostics, ErrorHandler};
pub use error::{Error, ErrorKind};
pub use record::{
    EVENT_TAGS_KEY, ORIGINAL_MSG_KEY, Record, SPLICE_NAME, UNPARSED_DATA_KEY, add_unparsed,
    store_capture,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
