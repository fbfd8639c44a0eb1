//! Leaf value processors.
//!
//! This module provides [`LeafSchema`], which hands the value to a plain
//! validator function, and the stock validators behind
//! [`Schema::number`](super::Schema::number) and friends.

use std::sync::Arc;

use regex::Regex;

use crate::path::JsonPath;
use crate::validation::{lift, ExtractResult};
use crate::value::Value;

use super::traits::Processor;

/// A function that accepts or rejects a raw value.
///
/// On success it returns the (possibly transformed) value, on failure a
/// message that becomes a [`Custom`](crate::ErrorKind::Custom) error at the
/// current path.
pub type Validator = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;

/// A processor that validates a single value.
///
/// # Example
///
/// ```rust
/// use boulder::{JsonPath, Processor, Schema, Value};
///
/// let positive = Schema::value(|v: &Value| match v.as_f64() {
///     Some(n) if n > 0.0 => Ok(v.clone()),
///     _ => Err("must be a positive number".to_string()),
/// });
///
/// assert!(positive.extract_prop(&JsonPath::root(), &Value::from(4.0)).is_success());
/// assert!(positive.extract_prop(&JsonPath::root(), &Value::from(-1.0)).is_failure());
/// ```
#[derive(Clone)]
pub struct LeafSchema {
    validator: Validator,
}

impl LeafSchema {
    pub fn new<F>(validator: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            validator: Arc::new(validator),
        }
    }

    pub fn from_validator(validator: Validator) -> Self {
        Self { validator }
    }
}

impl Processor for LeafSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        lift((self.validator)(value), path)
    }

    fn describe(&self) -> String {
        "val".to_string()
    }
}

/// Accepts anything.
pub fn accept_any() -> Validator {
    Arc::new(|v: &Value| Ok(v.clone()))
}

/// Accepts values whose [`type_name`](Value::type_name) is `expected`.
pub fn expect_type(expected: &'static str) -> Validator {
    Arc::new(move |v: &Value| {
        if v.type_name() == expected {
            Ok(v.clone())
        } else {
            Err(format!(
                "Expected type: {} but got: {}",
                expected,
                v.type_name()
            ))
        }
    })
}

/// Accepts strings equal to one of `values`.
pub fn string_enum(values: Vec<String>) -> Validator {
    Arc::new(move |v: &Value| match v.as_str() {
        Some(s) if values.iter().any(|allowed| allowed == s) => Ok(v.clone()),
        _ => Err(format!(
            "Unsupported value: \"{}\", choose one of \"{}\".",
            display_raw(v),
            values.join(", ")
        )),
    })
}

/// Accepts strings matching `pattern`.
///
/// # Errors
///
/// Returns the regex compilation error if `pattern` is invalid.
pub fn matching(pattern: &str) -> Result<Validator, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(Arc::new(move |v: &Value| match v.as_str() {
        Some(s) if regex.is_match(s) => Ok(v.clone()),
        _ => Err(format!(
            "Value \"{}\" does not match pattern: {}",
            display_raw(v),
            regex.as_str()
        )),
    }))
}

fn display_raw(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn unwrap_failure(v: ExtractResult<Value>) -> crate::SchemaErrors {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_leaf_passes_value_through() {
        let schema = LeafSchema::from_validator(accept_any());
        let result = schema.extract_prop(&JsonPath::root(), &Value::from("kept"));
        assert_eq!(result.into_result().unwrap(), Value::from("kept"));
    }

    #[test]
    fn test_leaf_wraps_failure_at_path() {
        let schema = LeafSchema::from_validator(expect_type("number"));
        let path = JsonPath::from_field("width");

        let errors = unwrap_failure(schema.extract_prop(&path, &Value::from("wide")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path, path);
        assert_eq!(errors.first().kind, ErrorKind::Custom);
        assert_eq!(
            errors.first().explain(),
            "Expected type: number but got: string"
        );
    }

    #[test]
    fn test_string_enum() {
        let schema = LeafSchema::from_validator(string_enum(vec![
            "left".to_string(),
            "right".to_string(),
        ]));

        assert!(schema
            .extract_prop(&JsonPath::root(), &Value::from("left"))
            .is_success());

        let errors = unwrap_failure(schema.extract_prop(&JsonPath::root(), &Value::from("up")));
        assert_eq!(
            errors.first().explain(),
            "Unsupported value: \"up\", choose one of \"left, right\"."
        );
    }

    #[test]
    fn test_matching() {
        let schema = LeafSchema::from_validator(matching(r"^[a-z]+$").unwrap());
        assert!(schema
            .extract_prop(&JsonPath::root(), &Value::from("abc"))
            .is_success());
        assert!(schema
            .extract_prop(&JsonPath::root(), &Value::from("1x"))
            .is_failure());
        assert!(schema
            .extract_prop(&JsonPath::root(), &Value::from(1.0))
            .is_failure());

        assert!(matching("(").is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(LeafSchema::from_validator(accept_any()).describe(), "val");
    }
}
