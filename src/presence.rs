//! Field presence policies.
//!
//! A [`FieldPresence`] decides what happens when an object field is looked
//! up: whether absence is an error, is filled from a fallback, or produces
//! an empty optional. Absent means the key is missing or holds `null`.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Computes a value from the whole input object.
pub type Fallback = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// How a named field is looked up from its parent object.
#[derive(Clone)]
pub enum FieldPresence {
    /// The field must be present.
    Strict,
    /// An absent field is replaced by the fallback's value, computed from the
    /// parent object.
    DefaultedThunk(Fallback),
    /// An absent field yields an empty optional; a present one is wrapped.
    AsOption,
    /// Like [`AsOption`](Self::AsOption), but a present `true` is replaced by
    /// the fallback's value before validation.
    DefaultedOptionThunk(Fallback),
    /// The field (or `{}` when absent) is deep-merged onto the fallback's
    /// object before validation; the field's own keys win.
    MergeWithThunk(Fallback),
}

impl FieldPresence {
    pub fn strict() -> Self {
        FieldPresence::Strict
    }

    /// Defaults an absent field to a constant.
    pub fn defaulted(fallback: impl Into<Value>) -> Self {
        let fallback = fallback.into();
        FieldPresence::DefaultedThunk(Arc::new(move |_| fallback.clone()))
    }

    /// Defaults an absent field from the parent object.
    pub fn defaulted_thunk<F>(fallback: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        FieldPresence::DefaultedThunk(Arc::new(fallback))
    }

    pub fn as_option() -> Self {
        FieldPresence::AsOption
    }

    pub fn as_defaulted_option_thunk<F>(fallback: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        FieldPresence::DefaultedOptionThunk(Arc::new(fallback))
    }

    /// Merges the field onto a constant base object.
    pub fn merge_with(base: impl Into<Value>) -> Self {
        let base = base.into();
        FieldPresence::MergeWithThunk(Arc::new(move |_| base.clone()))
    }

    pub fn merge_with_thunk<F>(base: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        FieldPresence::MergeWithThunk(Arc::new(base))
    }
}

impl fmt::Debug for FieldPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldPresence::Strict => "Strict",
            FieldPresence::DefaultedThunk(_) => "DefaultedThunk",
            FieldPresence::AsOption => "AsOption",
            FieldPresence::DefaultedOptionThunk(_) => "DefaultedOptionThunk",
            FieldPresence::MergeWithThunk(_) => "MergeWithThunk",
        };
        f.write_str(name)
    }
}
