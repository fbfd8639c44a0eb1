//! Field specifications for object schemas.
//!
//! A [`FieldSpec`] either pulls a key out of the input object (subject to a
//! [`FieldPresence`] policy and a nested processor) or synthesizes an output
//! key from the whole input. The free functions here are the usual way of
//! building them.
//!
//! # Example
//!
//! ```rust
//! use boulder::{extract, field, Schema, Value};
//! use serde_json::json;
//!
//! let dialog = Schema::obj_of(vec![
//!     field::strict_string("title"),
//!     field::defaulted_number("width", 400.0),
//!     field::option_boolean("modal"),
//! ]);
//!
//! let out = extract(&dialog, &Value::from(json!({"title": "Insert link"})))
//!     .into_result()
//!     .unwrap();
//! assert_eq!(out.get("width"), Some(&Value::Number(400.0)));
//! assert_eq!(out.get("modal"), Some(&Value::none()));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::presence::FieldPresence;
use crate::schema::{shared, ArraySchema, LeafSchema, ObjectSchema, Processor, SharedProcessor};
use crate::schema::leaf;
use crate::value::Value;

/// Synthesizes an output value from the whole input object.
pub type Generator = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// One entry of an object schema.
#[derive(Clone)]
pub enum FieldSpec {
    /// Reads `key` from the input and stores the result under `output_key`.
    Field {
        key: String,
        output_key: String,
        presence: FieldPresence,
        processor: SharedProcessor,
    },
    /// Stores `generator(input)` under `output_key`. Never fails and is not
    /// part of the permitted key set of closed objects.
    State {
        output_key: String,
        generator: Generator,
    },
}

impl FieldSpec {
    /// The source key, if this field reads from the input.
    pub fn source_key(&self) -> Option<&str> {
        match self {
            FieldSpec::Field { key, .. } => Some(key),
            FieldSpec::State { .. } => None,
        }
    }

    pub fn output_key(&self) -> &str {
        match self {
            FieldSpec::Field { output_key, .. } | FieldSpec::State { output_key, .. } => {
                output_key
            }
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Field {
                key,
                output_key,
                presence,
                processor,
            } => f
                .debug_struct("Field")
                .field("key", key)
                .field("output_key", output_key)
                .field("presence", presence)
                .field("processor", &processor.describe())
                .finish(),
            FieldSpec::State { output_key, .. } => f
                .debug_struct("State")
                .field("output_key", output_key)
                .finish(),
        }
    }
}

/// The fully general field constructor.
pub fn field<P>(
    key: impl Into<String>,
    output_key: impl Into<String>,
    presence: FieldPresence,
    processor: P,
) -> FieldSpec
where
    P: Processor + 'static,
{
    FieldSpec::Field {
        key: key.into(),
        output_key: output_key.into(),
        presence,
        processor: shared(processor),
    }
}

fn same_key<P: Processor + 'static>(
    key: impl Into<String>,
    presence: FieldPresence,
    processor: P,
) -> FieldSpec {
    let key = key.into();
    field(key.clone(), key, presence, processor)
}

fn any() -> LeafSchema {
    LeafSchema::from_validator(leaf::accept_any())
}

fn typed(expected: &'static str) -> LeafSchema {
    LeafSchema::from_validator(leaf::expect_type(expected))
}

fn enumerated(values: &[&str]) -> LeafSchema {
    LeafSchema::from_validator(leaf::string_enum(
        values.iter().map(|v| v.to_string()).collect(),
    ))
}

/// Stores a constant under `output_key`.
pub fn output(output_key: impl Into<String>, value: impl Into<Value>) -> FieldSpec {
    let value = value.into();
    FieldSpec::State {
        output_key: output_key.into(),
        generator: Arc::new(move |_| value.clone()),
    }
}

/// Stores the whole input object under `output_key`.
pub fn snapshot(output_key: impl Into<String>) -> FieldSpec {
    FieldSpec::State {
        output_key: output_key.into(),
        generator: Arc::new(|input| input.clone()),
    }
}

/// Stores `generator(input)` under `output_key`.
pub fn state<F>(output_key: impl Into<String>, generator: F) -> FieldSpec
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    FieldSpec::State {
        output_key: output_key.into(),
        generator: Arc::new(generator),
    }
}

pub fn strict(key: impl Into<String>) -> FieldSpec {
    same_key(key, FieldPresence::strict(), any())
}

pub fn strict_of<P: Processor + 'static>(key: impl Into<String>, processor: P) -> FieldSpec {
    same_key(key, FieldPresence::strict(), processor)
}

pub fn strict_number(key: impl Into<String>) -> FieldSpec {
    strict_of(key, typed("number"))
}

pub fn strict_string(key: impl Into<String>) -> FieldSpec {
    strict_of(key, typed("string"))
}

pub fn strict_boolean(key: impl Into<String>) -> FieldSpec {
    strict_of(key, typed("boolean"))
}

pub fn strict_function(key: impl Into<String>) -> FieldSpec {
    strict_of(key, typed("function"))
}

pub fn strict_string_enum(key: impl Into<String>, values: &[&str]) -> FieldSpec {
    strict_of(key, enumerated(values))
}

pub fn strict_array_of<P: Processor + 'static>(key: impl Into<String>, element: P) -> FieldSpec {
    strict_of(key, ArraySchema::new(element))
}

pub fn strict_obj_of(key: impl Into<String>, fields: Vec<FieldSpec>) -> FieldSpec {
    strict_of(key, ObjectSchema::new(fields))
}

pub fn option(key: impl Into<String>) -> FieldSpec {
    same_key(key, FieldPresence::as_option(), any())
}

pub fn option_of<P: Processor + 'static>(key: impl Into<String>, processor: P) -> FieldSpec {
    same_key(key, FieldPresence::as_option(), processor)
}

pub fn option_number(key: impl Into<String>) -> FieldSpec {
    option_of(key, typed("number"))
}

pub fn option_string(key: impl Into<String>) -> FieldSpec {
    option_of(key, typed("string"))
}

pub fn option_boolean(key: impl Into<String>) -> FieldSpec {
    option_of(key, typed("boolean"))
}

pub fn option_function(key: impl Into<String>) -> FieldSpec {
    option_of(key, typed("function"))
}

pub fn option_obj_of(key: impl Into<String>, fields: Vec<FieldSpec>) -> FieldSpec {
    option_of(key, ObjectSchema::new(fields))
}

pub fn defaulted(key: impl Into<String>, fallback: impl Into<Value>) -> FieldSpec {
    same_key(key, FieldPresence::defaulted(fallback), any())
}

pub fn defaulted_of<P: Processor + 'static>(
    key: impl Into<String>,
    fallback: impl Into<Value>,
    processor: P,
) -> FieldSpec {
    same_key(key, FieldPresence::defaulted(fallback), processor)
}

pub fn defaulted_number(key: impl Into<String>, fallback: f64) -> FieldSpec {
    defaulted_of(key, fallback, typed("number"))
}

pub fn defaulted_string(key: impl Into<String>, fallback: impl Into<String>) -> FieldSpec {
    defaulted_of(key, fallback.into(), typed("string"))
}

pub fn defaulted_boolean(key: impl Into<String>, fallback: bool) -> FieldSpec {
    defaulted_of(key, fallback, typed("boolean"))
}

pub fn defaulted_string_enum(
    key: impl Into<String>,
    fallback: impl Into<String>,
    values: &[&str],
) -> FieldSpec {
    defaulted_of(key, fallback.into(), enumerated(values))
}

/// An absent object field defaults to `{}` before the nested schema runs, so
/// the nested schema's own defaults fill it in.
pub fn defaulted_obj_of(key: impl Into<String>, fields: Vec<FieldSpec>) -> FieldSpec {
    defaulted_of(key, Value::object(), ObjectSchema::new(fields))
}

pub fn defaulted_array_of<P: Processor + 'static>(
    key: impl Into<String>,
    fallback: Vec<Value>,
    element: P,
) -> FieldSpec {
    defaulted_of(key, fallback, ArraySchema::new(element))
}

pub fn defaulted_option_thunk<F, P>(key: impl Into<String>, fallback: F, processor: P) -> FieldSpec
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
    P: Processor + 'static,
{
    same_key(key, FieldPresence::as_defaulted_option_thunk(fallback), processor)
}

pub fn merge_with<P: Processor + 'static>(
    key: impl Into<String>,
    base: impl Into<Value>,
    processor: P,
) -> FieldSpec {
    same_key(key, FieldPresence::merge_with(base), processor)
}

pub fn merge_with_thunk<F, P>(key: impl Into<String>, base: F, processor: P) -> FieldSpec
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
    P: Processor + 'static,
{
    same_key(key, FieldPresence::merge_with_thunk(base), processor)
}
