//! Array processors.
//!
//! This module provides [`ArraySchema`] for extracting every element of an
//! array with the same processor.

use crate::combine::consolidate;
use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{fail, ExtractResult};
use crate::value::Value;

use super::traits::{shared, Processor, SharedProcessor};

/// A processor applying one element processor to every array item.
///
/// Each element is extracted at the parent path extended by `[index]`.
/// All failing elements are reported together; on success the extracted
/// elements keep their original order.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::arr_of(Schema::number());
///
/// let errors = extract(&schema, &Value::from(json!([1, "x", 3])))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().path.to_string(), "[1]");
/// ```
#[derive(Clone)]
pub struct ArraySchema {
    element: SharedProcessor,
}

impl ArraySchema {
    pub fn new<P: Processor + 'static>(element: P) -> Self {
        Self {
            element: shared(element),
        }
    }

    pub fn from_shared(element: SharedProcessor) -> Self {
        Self { element }
    }

    /// Extracts each element of `items`.
    pub fn extract_items(&self, path: &JsonPath, items: &[Value]) -> ExtractResult<Vec<Value>> {
        consolidate(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| self.element.extract_prop(&path.push_index(i), item)),
        )
    }
}

impl Processor for ArraySchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        match value {
            Value::Array(items) => self.extract_items(path, items).map(Value::Array),
            other => fail(SchemaError::custom(
                path.clone(),
                format!("Expected array but got: {}", other.type_name()),
            )),
        }
    }

    fn describe(&self) -> String {
        format!("array({})", self.element.describe())
    }
}
