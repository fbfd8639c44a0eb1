use boulder::{
    consolidate, extract, fail, field, ErrorKind, ExtractResult, JsonPath, Schema, SchemaError,
    SchemaErrors, ValidationExt, Value,
};
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;

fn unwrap_failure<T: std::fmt::Debug>(v: ExtractResult<T>) -> SchemaErrors {
    v.into_result().unwrap_err()
}

// ====== SchemaErrors Tests ======

#[test]
fn test_combine_preserves_order() {
    let errors = SchemaErrors::single(SchemaError::custom(JsonPath::from_field("a"), "1"))
        .combine(SchemaErrors::single(SchemaError::custom(JsonPath::from_field("b"), "2")))
        .combine(SchemaErrors::single(SchemaError::custom(JsonPath::from_field("c"), "3")));

    let explained: Vec<_> = errors.iter().map(|e| e.explain()).collect();
    assert_eq!(explained, vec!["1", "2", "3"]);
}

#[test]
fn test_identical_errors_are_kept() {
    let error = SchemaError::custom(JsonPath::from_field("a"), "same");
    let errors = SchemaErrors::single(error.clone()).combine(SchemaErrors::single(error));
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_into_iterator() {
    let errors = SchemaErrors::from_vec(vec![
        SchemaError::missing_key(JsonPath::root(), "type"),
        SchemaError::custom(JsonPath::root(), "x"),
    ])
    .unwrap();

    let kinds: Vec<ErrorKind> = errors.into_iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::MissingChoiceKey, ErrorKind::Custom]);
}

#[test]
fn test_error_kind_codes() {
    assert_eq!(ErrorKind::MissingStrictValue.code(), "missing_strict");
    assert_eq!(ErrorKind::MissingChoiceKey.code(), "missing_key");
    assert_eq!(ErrorKind::MissingBranch.code(), "missing_branch");
    assert_eq!(ErrorKind::UnsupportedFields.code(), "unsupported_fields");
    assert_eq!(ErrorKind::Custom.code(), "custom");
}

// ====== Consolidation Tests ======

#[test]
fn test_consolidate_all_success() {
    let results: Vec<ExtractResult<i32>> = vec![Validation::Success(1), Validation::Success(2)];
    assert_eq!(consolidate(results).into_result().unwrap(), vec![1, 2]);
}

#[test]
fn test_consolidate_empty() {
    let results: Vec<ExtractResult<i32>> = Vec::new();
    assert_eq!(consolidate(results).into_result().unwrap(), Vec::<i32>::new());
}

#[test]
fn test_consolidate_collects_every_failure() {
    let results: Vec<ExtractResult<i32>> = vec![
        fail(SchemaError::custom(JsonPath::root().push_index(0), "a")),
        Validation::Success(1),
        fail(SchemaError::custom(JsonPath::root().push_index(2), "b")),
    ];

    let errors = unwrap_failure(consolidate(results));
    let paths: Vec<_> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["[0]", "[2]"]);
}

// ====== Combinator Tests ======

#[test]
fn test_either_on_extraction() {
    let schema = Schema::obj_of(vec![field::strict("a"), field::strict("b")]);

    let count = extract(&schema, &Value::object()).either(|e| e.len(), |_| 0);
    assert_eq!(count, 2);

    let count = extract(&schema, &Value::from(json!({"a": 1, "b": 2}))).either(|e| e.len(), |_| 0);
    assert_eq!(count, 0);
}

#[test]
fn test_bind_error_recovers() {
    let recovered: ExtractResult<Value> = extract(&Schema::number(), &Value::from("x"))
        .bind_error(|_| Validation::Success(Value::Number(0.0)));
    assert_eq!(recovered.into_result().unwrap(), Value::Number(0.0));
}

// ====== Rendering Tests ======

#[test]
fn test_missing_strict_renders_input() {
    let schema = Schema::obj_of(vec![field::strict("title")]);
    let errors = unwrap_failure(extract(&schema, &Value::from(json!({"width": 10}))));

    assert_eq!(
        errors.first().to_string(),
        "Failed path: (title)\nCould not find valid *strict* value for \"title\" in {\n  \"width\": 10\n}"
    );
}

#[test]
fn test_large_objects_are_not_printed() {
    let mut big = serde_json::Map::new();
    for i in 0..150 {
        big.insert(format!("key{}", i), json!(i));
    }
    let schema = Schema::obj_of(vec![field::strict("title")]);
    let errors = unwrap_failure(extract(&schema, &Value::from(serde_json::Value::Object(big))));

    assert_eq!(
        errors.first().explain(),
        "Could not find valid *strict* value for \"title\" in  removed due to size"
    );
}
