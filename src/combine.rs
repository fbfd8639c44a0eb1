//! Aggregation of sibling extraction results.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::validation::ExtractResult;

/// Combines sibling results without short-circuiting.
///
/// If every result succeeded, the values are returned in input order.
/// Otherwise the failure holds the errors of every failing result,
/// concatenated in input order.
///
/// # Example
///
/// ```rust
/// use boulder::{consolidate, fail, JsonPath, SchemaError};
/// use stillwater::Validation;
///
/// let results = vec![
///     Validation::Success(1),
///     fail(SchemaError::custom(JsonPath::root().push_index(1), "bad")),
///     fail(SchemaError::custom(JsonPath::root().push_index(2), "worse")),
/// ];
///
/// let errors = consolidate(results).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub fn consolidate<T, I>(results: I) -> ExtractResult<Vec<T>>
where
    I: IntoIterator<Item = ExtractResult<T>>,
{
    let iter = results.into_iter();
    let mut values = Vec::with_capacity(iter.size_hint().0);
    let mut errors: Option<SchemaErrors> = None;

    for result in iter {
        match result {
            Validation::Success(value) => {
                if errors.is_none() {
                    values.push(value);
                }
            }
            Validation::Failure(e) => {
                errors = Some(match errors.take() {
                    Some(acc) => acc.combine(e),
                    None => e,
                });
            }
        }
    }

    match errors {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(values),
    }
}
