//! Schema extraction error types.
//!
//! This module provides [`SchemaError`] for single extraction failures and
//! [`SchemaErrors`] for accumulating multiple errors.

use std::fmt::{self, Display};
use std::sync::Arc;

use stillwater::prelude::*;

use crate::path::JsonPath;
use crate::value::{format_value, Value};

type Explain = Arc<dyn Fn() -> String + Send + Sync>;

/// The closed set of failures a processor can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A strict field was absent from the input object.
    MissingStrictValue,
    /// A choice schema's discriminator key was absent.
    MissingChoiceKey,
    /// A choice schema's discriminator named an unknown branch.
    MissingBranch,
    /// A closed object received keys it does not declare.
    UnsupportedFields,
    /// A leaf validator rejected the value.
    Custom,
}

impl ErrorKind {
    /// Machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingStrictValue => "missing_strict",
            ErrorKind::MissingChoiceKey => "missing_key",
            ErrorKind::MissingBranch => "missing_branch",
            ErrorKind::UnsupportedFields => "unsupported_fields",
            ErrorKind::Custom => "custom",
        }
    }
}

/// A single extraction error.
///
/// The explanation is computed lazily: constructing an error captures what it
/// needs, and the message is only formatted when the error is rendered.
///
/// # Example
///
/// ```rust
/// use boulder::{ErrorKind, JsonPath, SchemaError};
///
/// let error = SchemaError::custom(
///     JsonPath::root().push_field("toolbar"),
///     "Expected type: string but got: number",
/// );
///
/// assert_eq!(error.kind, ErrorKind::Custom);
/// assert_eq!(
///     error.to_string(),
///     "Failed path: (toolbar)\nExpected type: string but got: number"
/// );
/// ```
#[derive(Clone)]
pub struct SchemaError {
    /// Where the failure happened, relative to the extraction root.
    pub path: JsonPath,
    /// Which kind of failure this is.
    pub kind: ErrorKind,
    explain: Explain,
}

impl SchemaError {
    /// Creates an error whose explanation is produced on demand.
    pub fn new<F>(path: JsonPath, kind: ErrorKind, explain: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            path,
            kind,
            explain: Arc::new(explain),
        }
    }

    /// Renders the human-readable explanation.
    pub fn explain(&self) -> String {
        (self.explain)()
    }

    /// A strict field was not found in `obj`.
    ///
    /// `obj` is shared with the other errors raised for the same object.
    pub fn missing_strict(path: JsonPath, key: impl Into<String>, obj: Arc<Value>) -> Self {
        let key = key.into();
        Self::new(path, ErrorKind::MissingStrictValue, move || {
            format!(
                "Could not find valid *strict* value for \"{}\" in {}",
                key,
                format_value(&obj)
            )
        })
    }

    /// A choice schema's discriminator key was not found.
    pub fn missing_key(path: JsonPath, key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(path, ErrorKind::MissingChoiceKey, move || {
            format!("Choice schema did not contain choice key: \"{}\"", key)
        })
    }

    /// The chosen branch is not one of `branches`.
    pub fn missing_branch(path: JsonPath, branches: Value, branch: impl Into<String>) -> Self {
        let branch = branch.into();
        Self::new(path, ErrorKind::MissingBranch, move || {
            format!(
                "The chosen schema: \"{}\" did not exist in branches: {}",
                branch,
                format_value(&branches)
            )
        })
    }

    /// The input carried keys outside the permitted set.
    pub fn unsupported_fields(path: JsonPath, unsupported: Vec<String>) -> Self {
        Self::new(path, ErrorKind::UnsupportedFields, move || {
            format!(
                "There are unsupported fields: [{}] specified",
                unsupported.join(", ")
            )
        })
    }

    /// Wraps a validator-supplied message.
    pub fn custom(path: JsonPath, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(path, ErrorKind::Custom, move || message.clone())
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed path: ({})\n{}", self.path, self.explain())
    }
}

impl fmt::Debug for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaError")
            .field("path", &self.path.to_string())
            .field("kind", &self.kind)
            .field("explain", &self.explain())
            .finish()
    }
}

impl PartialEq for SchemaError {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.kind == other.kind && self.explain() == other.explain()
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty collection of extraction errors.
///
/// Combining two collections concatenates them in order. Errors are never
/// deduplicated: two alternatives failing at the same path with the same
/// message produce two entries.
///
/// ```rust
/// use boulder::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let errors = SchemaErrors::single(SchemaError::custom(JsonPath::root(), "first"))
///     .combine(SchemaErrors::single(SchemaError::custom(JsonPath::root(), "first")));
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a `SchemaErrors` containing a single error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `SchemaErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors of the specified kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = Box<dyn Iterator<Item = &'a SchemaError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};
