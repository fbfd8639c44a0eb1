//! Schema construction.
//!
//! This module provides the processor types and the [`Schema`] factory used
//! to compose them. Schemas are built bottom-up (leaf validators, then field
//! specs, then object/array/alternative combinators) and extracted top-down.
//!
//! # Example
//!
//! ```rust
//! use boulder::{extract, field, Schema, Value};
//! use serde_json::json;
//!
//! let toolbar = Schema::obj_of(vec![
//!     field::strict_string("name"),
//!     field::strict_array_of("items", Schema::string()),
//! ]);
//!
//! let result = extract(&toolbar, &Value::from(json!({
//!     "name": "formatting",
//!     "items": ["bold", "italic"]
//! })));
//! assert!(result.is_success());
//! ```

pub mod leaf;

mod array;
mod combinators;
mod function;
mod lazy;
mod object;
mod traits;

use std::sync::Arc;

use indexmap::IndexMap;

pub use array::ArraySchema;
pub use combinators::{ChooseSchema, OneOfSchema, SetOfSchema};
pub use function::{FunctionSchema, Retriever};
pub use lazy::{RecursiveSchema, SelfRef, ThunkSchema, ValueThunkSchema};
pub use leaf::{LeafSchema, Validator};
pub use object::{extract_field, ClosedObjectSchema, ObjectSchema};
pub use traits::{shared, Processor, SharedProcessor};

use crate::field::FieldSpec;
use crate::value::Value;

/// Entry point for creating processors.
///
/// Every method returns a concrete processor type; use [`shared`] to erase
/// types when mixing processors in one list (e.g. for [`Schema::one_of`]).
pub struct Schema;

impl Schema {
    /// Accepts any value unchanged.
    pub fn any_value() -> LeafSchema {
        LeafSchema::from_validator(leaf::accept_any())
    }

    /// Validates a single value with `validator`.
    ///
    /// A rejected value becomes a custom error at the current path.
    pub fn value<F>(validator: F) -> LeafSchema
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        LeafSchema::new(validator)
    }

    pub fn number() -> LeafSchema {
        LeafSchema::from_validator(leaf::expect_type("number"))
    }

    pub fn string() -> LeafSchema {
        LeafSchema::from_validator(leaf::expect_type("string"))
    }

    pub fn boolean() -> LeafSchema {
        LeafSchema::from_validator(leaf::expect_type("boolean"))
    }

    /// Accepts function values as they are. See [`Schema::func`] to wrap them.
    pub fn function() -> LeafSchema {
        LeafSchema::from_validator(leaf::expect_type("function"))
    }

    /// Accepts one of a fixed set of strings.
    pub fn string_enum(values: &[&str]) -> LeafSchema {
        LeafSchema::from_validator(leaf::string_enum(
            values.iter().map(|v| v.to_string()).collect(),
        ))
    }

    /// Accepts strings matching a regex.
    ///
    /// # Errors
    ///
    /// Returns the compilation error for an invalid pattern.
    pub fn matching(pattern: &str) -> Result<LeafSchema, regex::Error> {
        leaf::matching(pattern).map(LeafSchema::from_validator)
    }

    /// An object with the given fields; undeclared input keys are dropped.
    pub fn obj_of(fields: Vec<FieldSpec>) -> ObjectSchema {
        ObjectSchema::new(fields)
    }

    /// An object with the given fields; undeclared input keys are an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boulder::{extract, field, ErrorKind, Schema, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::obj_of_only(vec![field::strict_number("rows")]);
    ///
    /// let errors = extract(&schema, &Value::from(json!({"rows": 2, "cols": 3})))
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(errors.first().kind, ErrorKind::UnsupportedFields);
    /// ```
    pub fn obj_of_only(fields: Vec<FieldSpec>) -> ClosedObjectSchema {
        ClosedObjectSchema::new(fields)
    }

    pub fn arr_of<P: Processor + 'static>(element: P) -> ArraySchema {
        ArraySchema::new(element)
    }

    /// An array of objects with the given fields.
    pub fn arr_of_obj(fields: Vec<FieldSpec>) -> ArraySchema {
        ArraySchema::new(ObjectSchema::new(fields))
    }

    /// Ordered alternatives; the first to succeed wins.
    pub fn one_of(alternatives: Vec<SharedProcessor>) -> OneOfSchema {
        OneOfSchema::new(alternatives)
    }

    /// An object whose keys all pass `key_validator` and whose values all
    /// pass `values`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boulder::{extract, Schema, Value};
    /// use serde_json::json;
    ///
    /// let shortcuts = Schema::set_of(
    ///     |k: &Value| match k.as_str() {
    ///         Some(s) if s.chars().all(|c| c.is_ascii_alphabetic()) => Ok(k.clone()),
    ///         _ => Err(format!("Invalid key: {}", k.as_str().unwrap_or_default())),
    ///     },
    ///     Schema::string(),
    /// );
    ///
    /// assert!(extract(&shortcuts, &Value::from(json!({"bold": "ctrl+b"}))).is_success());
    /// assert!(extract(&shortcuts, &Value::from(json!({"b0ld": "ctrl+b"}))).is_failure());
    /// ```
    pub fn set_of<F, P>(key_validator: F, values: P) -> SetOfSchema
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        P: Processor + 'static,
    {
        SetOfSchema::new(Arc::new(key_validator), shared(values))
    }

    /// Accepts callables, limiting them to `arg_names.len()` arguments and
    /// passing their results through `retriever`.
    pub fn func<F>(arg_names: Vec<String>, retriever: F) -> FunctionSchema
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        FunctionSchema::new(arg_names, Arc::new(retriever))
    }

    /// A schema built by `factory` on first use and cached from then on.
    pub fn thunk<F, P>(description: impl Into<String>, factory: F) -> ThunkSchema
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: Processor + 'static,
    {
        ThunkSchema::new(description, factory)
    }

    /// A schema that asks `get_delegate` for its delegate on every use.
    pub fn value_thunk<F>(get_delegate: F) -> ValueThunkSchema
    where
        F: Fn() -> SharedProcessor + Send + Sync + 'static,
    {
        ValueThunkSchema::new(Arc::new(get_delegate))
    }

    /// A schema that refers to itself through the handle passed to `build`.
    pub fn recursive<F, P>(description: impl Into<String>, build: F) -> Arc<RecursiveSchema>
    where
        F: FnOnce(SelfRef) -> P,
        P: Processor + 'static,
    {
        RecursiveSchema::new(description, build)
    }

    /// A discriminated union over the value of `key`.
    pub fn choose<K, I>(key: impl Into<String>, branches: I) -> ChooseSchema
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SharedProcessor)>,
    {
        let branches: IndexMap<String, SharedProcessor> = branches
            .into_iter()
            .map(|(name, processor)| (name.into(), processor))
            .collect();
        ChooseSchema::new(key, branches)
    }
}
