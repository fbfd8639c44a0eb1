//! Object processors.
//!
//! This module provides [`ObjectSchema`], which extracts a declared list of
//! fields and reports every failing field at once, and [`ClosedObjectSchema`],
//! which additionally rejects input keys the schema does not declare.

use std::sync::Arc;

use indexmap::IndexSet;
use once_cell::unsync::OnceCell;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::field::FieldSpec;
use crate::path::JsonPath;
use crate::presence::FieldPresence;
use crate::validation::{fail, ExtractResult};
use crate::value::{deep_merge, Object, Value};

use super::traits::Processor;

/// The object whose fields are being extracted.
///
/// Missing-field errors need an owned copy of the object for their message;
/// the copy is made on the first such error and shared by the rest.
struct InputSnapshot<'a> {
    value: &'a Value,
    shared: OnceCell<Arc<Value>>,
}

impl<'a> InputSnapshot<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            value,
            shared: OnceCell::new(),
        }
    }

    fn shared(&self) -> Arc<Value> {
        Arc::clone(self.shared.get_or_init(|| Arc::new(self.value.clone())))
    }
}

/// Resolves one field of `obj` under `presence` and runs `processor` on it.
///
/// The nested processor sees the path extended by `key`. Optional policies
/// short-circuit on absence without invoking the processor at all.
pub fn extract_field(
    presence: &FieldPresence,
    path: &JsonPath,
    obj: &Value,
    key: &str,
    processor: &dyn Processor,
) -> ExtractResult<Value> {
    extract_field_in(presence, path, &InputSnapshot::new(obj), key, processor)
}

fn extract_field_in(
    presence: &FieldPresence,
    path: &JsonPath,
    input: &InputSnapshot<'_>,
    key: &str,
    processor: &dyn Processor,
) -> ExtractResult<Value> {
    let obj = input.value;
    let field_path = path.push_field(key);

    match presence {
        FieldPresence::Strict => match obj.get(key) {
            Some(v) => processor.extract_prop(&field_path, v),
            None => fail(SchemaError::missing_strict(field_path, key, input.shared())),
        },
        FieldPresence::DefaultedThunk(fallback) => match obj.get(key) {
            Some(v) => processor.extract_prop(&field_path, v),
            None => processor.extract_prop(&field_path, &fallback(obj)),
        },
        FieldPresence::AsOption => match obj.get(key) {
            Some(v) => processor.extract_prop(&field_path, v).map(Value::some),
            None => Validation::Success(Value::none()),
        },
        FieldPresence::DefaultedOptionThunk(fallback) => match obj.get(key) {
            Some(Value::Bool(true)) => processor
                .extract_prop(&field_path, &fallback(obj))
                .map(Value::some),
            Some(v) => processor.extract_prop(&field_path, v).map(Value::some),
            None => Validation::Success(Value::none()),
        },
        FieldPresence::MergeWithThunk(base) => {
            let empty = Value::object();
            let overlay = obj.get(key).unwrap_or(&empty);
            let merged = deep_merge(&base(obj), overlay);
            processor.extract_prop(&field_path, &merged)
        }
    }
}

/// A processor over objects with a declared list of fields.
///
/// Fields are extracted in declaration order. Every failing field contributes
/// its errors; the extraction only succeeds when none fail. Input keys that
/// no field mentions are dropped from the output.
///
/// Non-object input is treated as an object with no keys.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, field, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::obj_of(vec![
///     field::strict_string("text"),
///     field::strict_number("size"),
/// ]);
///
/// let errors = extract(&schema, &Value::from(json!({"text": 1, "size": "big"})))
///     .into_result()
///     .unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Extracts the fields into an output object.
    pub fn extract_object(&self, path: &JsonPath, value: &Value) -> ExtractResult<Object> {
        let mut output = Object::with_capacity(self.fields.len());
        let mut errors: Vec<SchemaError> = Vec::new();
        let input = InputSnapshot::new(value);

        // Hot path: plain loop, one output map, one error buffer.
        for spec in &self.fields {
            match spec {
                FieldSpec::Field {
                    key,
                    output_key,
                    presence,
                    processor,
                } => match extract_field_in(presence, path, &input, key, processor.as_ref()) {
                    Validation::Success(v) => {
                        output.insert(output_key.clone(), v);
                    }
                    Validation::Failure(e) => errors.extend(e),
                },
                FieldSpec::State {
                    output_key,
                    generator,
                } => {
                    output.insert(output_key.clone(), generator(value));
                }
            }
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(output),
        }
    }
}

impl Processor for ObjectSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        self.extract_object(path, value).map(Value::Object)
    }

    fn describe(&self) -> String {
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|spec| match spec {
                FieldSpec::Field { key, processor, .. } => {
                    format!("{} -> {}", key, processor.describe())
                }
                FieldSpec::State { output_key, .. } => format!("state({})", output_key),
            })
            .collect();
        format!("obj{{\n{}}}", lines.join("\n"))
    }
}

/// An [`ObjectSchema`] that rejects undeclared keys.
///
/// The permitted keys are the source keys of the declared fields; synthesized
/// (state) fields do not count. Keys holding `null` are ignored. Any other key
/// outside the permitted set fails the whole extraction with a single
/// unsupported-fields error naming every offending key, and no field is
/// extracted.
#[derive(Clone, Debug)]
pub struct ClosedObjectSchema {
    delegate: ObjectSchema,
    permitted: IndexSet<String>,
}

impl ClosedObjectSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let permitted = fields
            .iter()
            .filter_map(|spec| spec.source_key().map(str::to_string))
            .collect();
        Self {
            delegate: ObjectSchema::new(fields),
            permitted,
        }
    }

    /// Returns the declared input keys.
    pub fn permitted_keys(&self) -> impl Iterator<Item = &str> {
        self.permitted.iter().map(String::as_str)
    }
}

impl Processor for ClosedObjectSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        let extra: Vec<String> = value
            .set_keys()
            .into_iter()
            .filter(|k| !self.permitted.contains(*k))
            .map(str::to_string)
            .collect();

        if extra.is_empty() {
            self.delegate.extract_prop(path, value)
        } else {
            fail(SchemaError::unsupported_fields(path.clone(), extra))
        }
    }

    fn describe(&self) -> String {
        self.delegate.describe()
    }
}
