//! Error types for extraction failures.
//!
//! This module provides the structured, path-qualified errors returned by
//! every processor, plus the boundary error used by fail-fast entry points.

mod extract_error;
mod schema_error;

pub use extract_error::ExtractError;
pub use schema_error::{ErrorKind, SchemaError, SchemaErrors};
