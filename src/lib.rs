//! # Boulder
//!
//! Schema-driven extraction of configuration values that reports ALL
//! failures, each with the path at which it happened.
//!
//! ## Overview
//!
//! A schema is a tree of processors. Extracting an input value walks the
//! schema and the value together, producing either a normalized output value
//! (defaults applied, optional fields wrapped, undeclared keys dropped) or a
//! non-empty list of errors. Sibling fields and array elements are always all
//! visited, so one run reports every problem in the input. Errors are
//! accumulated through stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic input/output value, including callables
//! - [`Processor`]: anything that can extract a value at a path
//! - [`Schema`]: entry point for creating processors
//! - [`field`]: field specifications for object schemas
//! - [`SchemaError`] / [`SchemaErrors`]: located extraction failures
//!
//! ## Example
//!
//! ```rust
//! use boulder::{extract, field, Schema, Value};
//! use serde_json::json;
//!
//! let dialog = Schema::obj_of(vec![
//!     field::strict_string("title"),
//!     field::defaulted_number("width", 400.0),
//!     field::option_boolean("resizable"),
//! ]);
//!
//! let out = extract(&dialog, &Value::from(json!({"title": "Insert link"})))
//!     .into_result()
//!     .unwrap();
//! assert_eq!(out.to_json(), json!({"title": "Insert link", "width": 400, "resizable": null}));
//!
//! let errors = extract(&dialog, &Value::from(json!({"width": "wide"})))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod combine;
pub mod error;
pub mod extract;
pub mod field;
pub mod path;
pub mod presence;
pub mod schema;
pub mod validation;
pub mod value;

pub use combine::consolidate;
pub use error::{ErrorKind, ExtractError, SchemaError, SchemaErrors};
pub use extract::{extract, extract_as, extract_or_fail, format_errors};
pub use field::FieldSpec;
pub use path::{JsonPath, PathSegment};
pub use presence::FieldPresence;
pub use schema::{
    shared, ArraySchema, ChooseSchema, ClosedObjectSchema, FunctionSchema, LeafSchema,
    ObjectSchema, OneOfSchema, Processor, RecursiveSchema, Schema, SelfRef, SetOfSchema,
    SharedProcessor, ThunkSchema, Validator, ValueThunkSchema,
};
pub use validation::{fail, lift, ExtractResult, ValidationExt};
pub use value::{deep_merge, format_value, Callable, Object, Value};
