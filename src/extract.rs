//! Running a schema against an input value.
//!
//! [`extract`] and [`extract_as`] return every error as a [`Validation`]
//! failure. [`extract_or_fail`] is the fail-fast flavour for callers that just
//! want a value or a printable error.
//!
//! [`Validation`]: stillwater::Validation

use stillwater::Validation;

use crate::error::{ExtractError, SchemaErrors};
use crate::path::JsonPath;
use crate::schema::Processor;
use crate::validation::ExtractResult;
use crate::value::Value;

/// Extracts `input` with `processor`, starting at the root path.
pub fn extract<P: Processor + ?Sized>(processor: &P, input: &Value) -> ExtractResult<Value> {
    processor.extract_prop(&JsonPath::root(), input)
}

/// Extracts `input` with every error path prefixed by `label`.
///
/// # Example
///
/// ```rust
/// use boulder::{extract_as, field, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::obj_of(vec![field::strict_number("height")]);
/// let errors = extract_as("editor", &schema, &Value::from(json!({"height": "tall"})))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "editor > height");
/// ```
pub fn extract_as<P: Processor + ?Sized>(
    label: &str,
    processor: &P,
    input: &Value,
) -> ExtractResult<Value> {
    processor.extract_prop(&JsonPath::from_field(label), input)
}

/// Extracts `input` and turns a failure into an [`ExtractError`].
///
/// # Errors
///
/// Returns an [`ExtractError`] carrying every error and the input when
/// extraction fails.
pub fn extract_or_fail<P: Processor + ?Sized>(
    label: &str,
    processor: &P,
    input: &Value,
) -> Result<Value, ExtractError> {
    match extract_as(label, processor, input) {
        Validation::Success(value) => Ok(value),
        Validation::Failure(errors) => {
            tracing::debug!(
                label,
                error_count = errors.len(),
                "schema extraction failed"
            );
            Err(ExtractError::new(errors, input.clone()))
        }
    }
}

/// Renders each error as `Failed path: (<path>)\n<explanation>`.
pub fn format_errors(errors: &SchemaErrors) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}
