//! The extraction result type and its combinators.
//!
//! Every processor returns an [`ExtractResult`]: stillwater's [`Validation`]
//! carrying either the extracted value or a non-empty list of
//! [`SchemaError`]s. `map` and `and_then` come from stillwater (`and_then` is
//! the fail-fast bind: a failure passes through untouched). [`ValidationExt`]
//! adds the fold and error-rebinding combinators used by the processors.

use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

/// Result of running a processor.
pub type ExtractResult<T> = Validation<T, SchemaErrors>;

/// Extra combinators over [`Validation`].
pub trait ValidationExt<T, E> {
    /// Collapses both variants into a single value.
    fn either<R, F, G>(self, on_errors: F, on_value: G) -> R
    where
        F: FnOnce(E) -> R,
        G: FnOnce(T) -> R;

    /// Replaces a failure with the result of `f`; successes pass through.
    fn bind_error<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> Validation<T, E2>;
}

impl<T, E> ValidationExt<T, E> for Validation<T, E> {
    fn either<R, F, G>(self, on_errors: F, on_value: G) -> R
    where
        F: FnOnce(E) -> R,
        G: FnOnce(T) -> R,
    {
        match self {
            Validation::Success(value) => on_value(value),
            Validation::Failure(errors) => on_errors(errors),
        }
    }

    fn bind_error<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> Validation<T, E2>,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(errors) => f(errors),
        }
    }
}

/// A failed result holding exactly one error.
pub fn fail<T>(error: SchemaError) -> ExtractResult<T> {
    Validation::Failure(SchemaErrors::single(error))
}

/// Lifts a validator's `Result` into an extraction result, attaching `path`
/// to the validator's message.
pub fn lift<T>(result: Result<T, String>, path: &JsonPath) -> ExtractResult<T> {
    let validation: Validation<T, String> = match result {
        Ok(value) => Validation::Success(value),
        Err(message) => Validation::Failure(message),
    };
    validation.bind_error(|message| fail(SchemaError::custom(path.clone(), message)))
}
