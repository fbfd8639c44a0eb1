//! The processor abstraction shared by every schema.
//!
//! A [`Processor`] turns a dynamic [`Value`] found at some [`JsonPath`] into an
//! extracted value or a list of errors. Schemas are composed from processors
//! and hold their children as [`SharedProcessor`]s, so one sub-schema can be
//! reused by any number of parents.

use std::sync::Arc;

use crate::path::JsonPath;
use crate::validation::ExtractResult;
use crate::value::Value;

/// An extractor over dynamic values.
///
/// Processors are immutable once built. The `Send + Sync` bounds let a single
/// schema tree serve concurrent extractions from many threads.
///
/// # Example
///
/// ```rust
/// use boulder::{field, JsonPath, Processor, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::obj_of(vec![field::strict_number("height")]);
///
/// let result = schema.extract_prop(&JsonPath::root(), &Value::from(json!({"height": 300})));
/// assert!(result.is_success());
/// assert!(schema.describe().starts_with("obj{"));
/// ```
pub trait Processor: Send + Sync {
    /// Extracts a value, reporting failures relative to `path`.
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value>;

    /// A short structural description of the schema, for diagnostics.
    fn describe(&self) -> String;
}

/// A type-erased, shareable processor.
pub type SharedProcessor = Arc<dyn Processor>;

/// Erases a processor's type so it can be stored alongside others.
pub fn shared<P: Processor + 'static>(processor: P) -> SharedProcessor {
    Arc::new(processor)
}

impl<P: Processor + ?Sized> Processor for Arc<P> {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        (**self).extract_prop(path, value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        (**self).extract_prop(path, value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
