//! Processors composed from other processors.
//!
//! - [`OneOfSchema`]: ordered alternatives, first success wins
//! - [`SetOfSchema`]: objects with validated dynamic keys and uniform values
//! - [`ChooseSchema`]: discriminated unions keyed by a field of the input

use indexmap::IndexMap;

use crate::combine::consolidate;
use crate::error::SchemaError;
use crate::field::FieldSpec;
use crate::path::JsonPath;
use crate::presence::FieldPresence;
use crate::validation::{fail, lift, ExtractResult};
use crate::value::{format_value, Value};

use super::leaf::Validator;
use super::object::ObjectSchema;
use super::traits::{Processor, SharedProcessor};

/// Tries each alternative in order against the same value.
///
/// The first success is returned and later alternatives are never run. If
/// every alternative fails, the errors of all of them are reported, in
/// declaration order.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, shared, Schema, Value};
///
/// let size = Schema::one_of(vec![shared(Schema::number()), shared(Schema::string())]);
///
/// assert!(extract(&size, &Value::from("12pt")).is_success());
/// let errors = extract(&size, &Value::Bool(true)).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone)]
pub struct OneOfSchema {
    alternatives: Vec<SharedProcessor>,
}

impl OneOfSchema {
    pub fn new(alternatives: Vec<SharedProcessor>) -> Self {
        Self { alternatives }
    }
}

impl Processor for OneOfSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        let mut failures = Vec::with_capacity(self.alternatives.len());

        for alternative in &self.alternatives {
            let result = alternative.extract_prop(path, value);
            if result.is_success() {
                return result;
            }
            failures.push(result);
        }

        // With no alternatives at all this succeeds with an empty array.
        consolidate(failures).map(Value::Array)
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.alternatives.iter().map(|p| p.describe()).collect();
        format!("oneOf({})", parts.join(", "))
    }
}

/// An object whose keys are not known ahead of time.
///
/// Every key is checked with the key validator (failures are reported at
/// `[index]` of the key in input order). If all keys pass, every key becomes a
/// strict field extracted with the value processor.
///
/// Non-object input has no keys and yields an empty object.
#[derive(Clone)]
pub struct SetOfSchema {
    key_validator: Validator,
    values: SharedProcessor,
}

impl SetOfSchema {
    pub fn new(key_validator: Validator, values: SharedProcessor) -> Self {
        Self {
            key_validator,
            values,
        }
    }

    fn validate_keys(&self, path: &JsonPath, keys: &[&String]) -> ExtractResult<Vec<String>> {
        consolidate(keys.iter().enumerate().map(|(i, key)| {
            let raw = Value::String((*key).clone());
            lift((self.key_validator)(&raw), &path.push_index(i)).map(|valid| match valid {
                Value::String(s) => s,
                _ => (*key).clone(),
            })
        }))
    }
}

impl Processor for SetOfSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        let keys: Vec<&String> = value
            .as_object()
            .map(|obj| obj.keys().collect())
            .unwrap_or_default();

        self.validate_keys(path, &keys).and_then(|valid_keys| {
            let fields = valid_keys
                .into_iter()
                .map(|key| FieldSpec::Field {
                    key: key.clone(),
                    output_key: key,
                    presence: FieldPresence::Strict,
                    processor: self.values.clone(),
                })
                .collect();
            ObjectSchema::new(fields).extract_prop(path, value)
        })
    }

    fn describe(&self) -> String {
        format!("setOf({})", self.values.describe())
    }
}

/// A discriminated union.
///
/// The value of `key` in the input selects a branch by name, and the whole
/// input is extracted by that branch at the path extended by
/// `branch: <name>`.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, field, shared, Schema, Value};
/// use serde_json::json;
///
/// let component = Schema::choose("type", vec![
///     ("button", shared(Schema::obj_of(vec![field::strict("type"), field::strict_string("text")]))),
///     ("separator", shared(Schema::obj_of(vec![field::strict("type")]))),
/// ]);
///
/// assert!(extract(&component, &Value::from(json!({"type": "separator"}))).is_success());
/// let errors = extract(&component, &Value::from(json!({"type": "button"})))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "branch: button > text");
/// ```
#[derive(Clone)]
pub struct ChooseSchema {
    key: String,
    branches: IndexMap<String, SharedProcessor>,
}

impl ChooseSchema {
    pub fn new(key: impl Into<String>, branches: IndexMap<String, SharedProcessor>) -> Self {
        Self {
            key: key.into(),
            branches,
        }
    }

    fn branch_names(&self) -> Value {
        Value::Array(self.branches.keys().map(|k| Value::from(k.as_str())).collect())
    }
}

impl Processor for ChooseSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        let chosen = match value.get(&self.key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => format_value(other),
            None => return fail(SchemaError::missing_key(path.clone(), self.key.as_str())),
        };

        match self.branches.get(&chosen) {
            Some(branch) => {
                branch.extract_prop(&path.push_field(format!("branch: {}", chosen)), value)
            }
            None => fail(SchemaError::missing_branch(
                path.clone(),
                self.branch_names(),
                chosen,
            )),
        }
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.branches.keys().map(String::as_str).collect();
        format!(
            "chooseOn({}). Possible values: [{}]",
            self.key,
            names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SchemaErrors};
    use crate::field;
    use crate::schema::{shared, LeafSchema, Schema};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn unwrap_failure(v: ExtractResult<Value>) -> SchemaErrors {
        v.into_result().unwrap_err()
    }

    fn alpha_keys() -> Validator {
        Arc::new(|k: &Value| match k.as_str() {
            Some(s) if s.chars().all(|c| c.is_ascii_alphabetic()) => Ok(k.clone()),
            _ => Err(format!("Invalid key: {}", k.as_str().unwrap_or_default())),
        })
    }

    #[test]
    fn test_one_of_stops_at_first_success() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later_calls);
        let schema = OneOfSchema::new(vec![
            shared(Schema::number()),
            shared(LeafSchema::new(move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(v.clone())
            })),
        ]);

        let out = schema.extract_prop(&JsonPath::root(), &Value::from(3.0));
        assert_eq!(out.into_result().unwrap(), Value::Number(3.0));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_one_of_reports_all_alternatives_in_order() {
        let schema = OneOfSchema::new(vec![shared(Schema::number()), shared(Schema::boolean())]);
        let errors = unwrap_failure(schema.extract_prop(&JsonPath::from_field("size"), &Value::from("x")));

        let explained: Vec<_> = errors.iter().map(|e| e.explain()).collect();
        assert_eq!(
            explained,
            vec![
                "Expected type: number but got: string",
                "Expected type: boolean but got: string"
            ]
        );
        assert!(errors.iter().all(|e| e.path.to_string() == "size"));
    }

    #[test]
    fn test_one_of_without_alternatives() {
        let schema = OneOfSchema::new(Vec::new());
        let out = schema.extract_prop(&JsonPath::root(), &Value::from("anything"));
        assert_eq!(out.into_result().unwrap(), Value::Array(Vec::new()));
    }

    #[test]
    fn test_set_of_valid_keys() {
        let schema = SetOfSchema::new(alpha_keys(), shared(Schema::number()));
        let out = schema.extract_prop(&JsonPath::root(), &Value::from(json!({"a": 1, "b": 2})));
        assert_eq!(out.into_result().unwrap().to_json(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_set_of_invalid_key_reported_at_index() {
        let schema = SetOfSchema::new(alpha_keys(), shared(Schema::number()));
        let errors = unwrap_failure(
            schema.extract_prop(&JsonPath::root(), &Value::from(json!({"a": 1, "1x": 2}))),
        );

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path.to_string(), "[1]");
        assert!(errors.first().explain().contains("1x"));
    }

    #[test]
    fn test_set_of_values_checked_after_keys() {
        let schema = SetOfSchema::new(alpha_keys(), shared(Schema::number()));
        let errors = unwrap_failure(schema.extract_prop(
            &JsonPath::from_field("shortcuts"),
            &Value::from(json!({"a": "x", "b": 2, "c": true})),
        ));

        let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["shortcuts > a", "shortcuts > c"]);
    }

    #[test]
    fn test_set_of_non_object_is_empty() {
        let schema = SetOfSchema::new(alpha_keys(), shared(Schema::number()));
        let out = schema.extract_prop(&JsonPath::root(), &Value::from(5.0));
        assert_eq!(out.into_result().unwrap(), Value::object());
    }

    fn component() -> ChooseSchema {
        let mut branches: IndexMap<String, SharedProcessor> = IndexMap::new();
        branches.insert(
            "button".to_string(),
            shared(Schema::obj_of(vec![field::strict("type"), field::strict_string("text")])),
        );
        branches.insert(
            "separator".to_string(),
            shared(Schema::obj_of(vec![field::strict("type")])),
        );
        ChooseSchema::new("type", branches)
    }

    #[test]
    fn test_choose_missing_key() {
        let errors = unwrap_failure(
            component().extract_prop(&JsonPath::from_field("item"), &Value::from(json!({"text": "x"}))),
        );
        assert_eq!(errors.first().kind, ErrorKind::MissingChoiceKey);
        assert_eq!(errors.first().path.to_string(), "item");
    }

    #[test]
    fn test_choose_unknown_branch() {
        let errors = unwrap_failure(
            component().extract_prop(&JsonPath::root(), &Value::from(json!({"type": "slider"}))),
        );
        assert_eq!(errors.first().kind, ErrorKind::MissingBranch);
        assert_eq!(
            errors.first().explain(),
            "The chosen schema: \"slider\" did not exist in branches: [\n  \"button\",\n  \"separator\"\n]"
        );
    }

    #[test]
    fn test_choose_branch_path() {
        let errors = unwrap_failure(component().extract_prop(
            &JsonPath::from_field("item"),
            &Value::from(json!({"type": "button", "text": 1})),
        ));
        assert_eq!(errors.first().path.to_string(), "item > branch: button > text");
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            OneOfSchema::new(vec![shared(Schema::number()), shared(Schema::string())]).describe(),
            "oneOf(val, val)"
        );
        assert_eq!(
            component().describe(),
            "chooseOn(type). Possible values: [button, separator]"
        );
    }
}
