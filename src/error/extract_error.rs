//! The error returned by fail-fast extraction.

use crate::error::SchemaErrors;
use crate::value::{format_value, Value};

/// Extraction failed; carries every error together with the offending input.
///
/// The message is rendered once, when the error is built:
///
/// ```text
/// Errors:
/// Failed path: (config > height)
/// Expected type: number but got: string
///
/// Input object: { ... }
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExtractError {
    message: String,
    errors: SchemaErrors,
    input: Value,
}

impl ExtractError {
    pub fn new(errors: SchemaErrors, input: Value) -> Self {
        let message = format!(
            "Errors: \n{}\n\nInput object: {}",
            errors,
            format_value(&input)
        );
        Self {
            message,
            errors,
            input,
        }
    }

    /// The accumulated extraction errors.
    pub fn errors(&self) -> &SchemaErrors {
        &self.errors
    }

    /// The input that failed extraction.
    pub fn input(&self) -> &Value {
        &self.input
    }

    pub fn into_errors(self) -> SchemaErrors {
        self.errors
    }
}
