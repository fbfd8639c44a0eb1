use boulder::{extract, field, ErrorKind, ExtractResult, FieldPresence, Schema, SchemaErrors, Value};
use serde_json::json;

fn unwrap_success(v: ExtractResult<Value>) -> serde_json::Value {
    v.into_result().unwrap().to_json()
}

fn unwrap_failure(v: ExtractResult<Value>) -> SchemaErrors {
    v.into_result().unwrap_err()
}

fn paths(errors: &SchemaErrors) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

// ====== objOf Tests ======

#[test]
fn test_every_failing_field_reported() {
    let schema = Schema::obj_of(vec![
        field::strict_string("text"),
        field::strict_number("width"),
        field::strict_boolean("enabled"),
    ]);

    let errors = unwrap_failure(extract(
        &schema,
        &Value::from(json!({"text": 1, "width": 20, "enabled": "yes"})),
    ));
    assert_eq!(paths(&errors), vec!["text", "enabled"]);
}

#[test]
fn test_undeclared_keys_dropped() {
    let schema = Schema::obj_of(vec![field::strict("a")]);
    let out = unwrap_success(extract(&schema, &Value::from(json!({"a": 1, "b": 2}))));
    assert_eq!(out, json!({"a": 1}));
}

#[test]
fn test_output_order_follows_declaration() {
    let schema = Schema::obj_of(vec![field::strict("b"), field::strict("a")]);
    let out = extract(&schema, &Value::from(json!({"a": 1, "b": 2})))
        .into_result()
        .unwrap();
    let keys: Vec<_> = out.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_nested_object_paths() {
    let schema = Schema::obj_of(vec![field::strict_obj_of(
        "dialog",
        vec![field::strict_obj_of("body", vec![field::strict_string("type")])],
    )]);

    let errors = unwrap_failure(extract(
        &schema,
        &Value::from(json!({"dialog": {"body": {"type": 3}}})),
    ));
    assert_eq!(paths(&errors), vec!["dialog > body > type"]);
}

#[test]
fn test_missing_nested_strict_is_at_parent_and_key() {
    let schema = Schema::obj_of(vec![field::strict_obj_of("dialog", vec![field::strict("title")])]);
    let errors = unwrap_failure(extract(&schema, &Value::from(json!({"dialog": {}}))));

    assert_eq!(errors.first().kind, ErrorKind::MissingStrictValue);
    assert_eq!(paths(&errors), vec!["dialog > title"]);
}

#[test]
fn test_defaulted_fields() {
    let schema = Schema::obj_of(vec![
        field::defaulted("theme", "silver"),
        field::defaulted_number("height", 200.0),
        field::defaulted_boolean("statusbar", true),
        field::defaulted_string_enum("mode", "design", &["design", "readonly"]),
        field::defaulted_obj_of("style", vec![field::defaulted_string("color", "black")]),
        field::defaulted_array_of("plugins", Vec::new(), Schema::string()),
    ]);

    let out = unwrap_success(extract(&schema, &Value::object()));
    assert_eq!(
        out,
        json!({
            "theme": "silver",
            "height": 200,
            "statusbar": true,
            "mode": "design",
            "style": {"color": "black"},
            "plugins": []
        })
    );
}

#[test]
fn test_present_value_overrides_default() {
    let schema = Schema::obj_of(vec![field::defaulted_number("height", 200.0)]);
    let out = unwrap_success(extract(&schema, &Value::from(json!({"height": 50}))));
    assert_eq!(out, json!({"height": 50}));
}

#[test]
fn test_null_uses_default() {
    let schema = Schema::obj_of(vec![field::defaulted_number("height", 200.0)]);
    let out = unwrap_success(extract(&schema, &Value::from(json!({"height": null}))));
    assert_eq!(out, json!({"height": 200}));
}

#[test]
fn test_string_enum_rejects_unknown_value() {
    let schema = Schema::obj_of(vec![field::strict_string_enum("align", &["left", "right"])]);
    let errors = unwrap_failure(extract(&schema, &Value::from(json!({"align": "center"}))));

    assert_eq!(
        errors.first().explain(),
        "Unsupported value: \"center\", choose one of \"left, right\"."
    );
}

#[test]
fn test_option_fields() {
    let schema = Schema::obj_of(vec![field::option_string("icon"), field::option_number("delay")]);
    let out = extract(&schema, &Value::from(json!({"icon": "bold"})))
        .into_result()
        .unwrap();

    assert_eq!(out.get("icon"), Some(&Value::some(Value::from("bold"))));
    assert_eq!(out.get("delay"), Some(&Value::none()));
}

#[test]
fn test_option_errors_keep_path() {
    let schema = Schema::obj_of(vec![field::option_obj_of("menu", vec![field::strict_string("title")])]);
    let errors = unwrap_failure(extract(&schema, &Value::from(json!({"menu": {"title": 1}}))));
    assert_eq!(paths(&errors), vec!["menu > title"]);
}

#[test]
fn test_merge_with_thunk_reads_input() {
    let schema = Schema::obj_of(vec![
        field::strict_string("skin"),
        field::merge_with_thunk(
            "ui",
            |obj| Value::from(json!({"skin": obj.get("skin").and_then(|s| s.as_str()).unwrap_or("none"), "menubar": true})),
            Schema::any_value(),
        ),
    ]);

    let out = unwrap_success(extract(
        &schema,
        &Value::from(json!({"skin": "oxide", "ui": {"menubar": false}})),
    ));
    assert_eq!(out, json!({"skin": "oxide", "ui": {"skin": "oxide", "menubar": false}}));
}

#[test]
fn test_state_field_sees_whole_input() {
    let schema = Schema::obj_of(vec![
        field::strict("a"),
        field::state("count", |obj| {
            Value::from(obj.as_object().map_or(0, |o| o.len()) as f64)
        }),
    ]);

    let out = unwrap_success(extract(&schema, &Value::from(json!({"a": 1, "b": 2, "c": 3}))));
    assert_eq!(out, json!({"a": 1, "count": 3}));
}

#[test]
fn test_field_with_explicit_presence() {
    let schema = Schema::obj_of(vec![field::field(
        "toolbar_mode",
        "mode",
        FieldPresence::defaulted("floating"),
        Schema::string_enum(&["floating", "sliding", "wrap"]),
    )]);

    assert_eq!(unwrap_success(extract(&schema, &Value::object())), json!({"mode": "floating"}));
    assert_eq!(
        unwrap_success(extract(&schema, &Value::from(json!({"toolbar_mode": "wrap"})))),
        json!({"mode": "wrap"})
    );
}

// ====== objOfOnly Tests ======

#[test]
fn test_closed_object_accepts_declared_keys() {
    let schema = Schema::obj_of_only(vec![field::strict("a"), field::option("b")]);
    let out = unwrap_success(extract(&schema, &Value::from(json!({"a": 1, "b": 2}))));
    assert_eq!(out, json!({"a": 1, "b": 2}));
}

#[test]
fn test_closed_object_uses_source_keys() {
    let schema = Schema::obj_of_only(vec![field::field(
        "old_name",
        "new_name",
        FieldPresence::strict(),
        Schema::any_value(),
    )]);

    assert!(extract(&schema, &Value::from(json!({"old_name": 1}))).is_success());

    let errors = unwrap_failure(extract(&schema, &Value::from(json!({"new_name": 1}))));
    let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::UnsupportedFields]);
}

#[test]
fn test_closed_object_error_at_object_path() {
    let schema = Schema::obj_of(vec![field::strict_of(
        "link",
        Schema::obj_of_only(vec![field::strict_string("url")]),
    )]);

    let errors = unwrap_failure(extract(
        &schema,
        &Value::from(json!({"link": {"url": "a", "target": "_blank", "rel": "x"}})),
    ));
    assert_eq!(paths(&errors), vec!["link"]);
    assert_eq!(
        errors.first().explain(),
        "There are unsupported fields: [target, rel] specified"
    );
}

#[test]
fn test_closed_object_non_object_input() {
    let schema = Schema::obj_of_only(vec![field::option("a")]);
    assert!(extract(&schema, &Value::Bool(true)).is_success());
}

#[test]
fn test_regex_validator() {
    let schema = Schema::obj_of(vec![field::strict_of(
        "color",
        Schema::matching("^#[0-9a-f]{6}$").unwrap(),
    )]);

    assert!(extract(&schema, &Value::from(json!({"color": "#ff00aa"}))).is_success());
    assert!(extract(&schema, &Value::from(json!({"color": "red"}))).is_failure());
    assert!(Schema::matching("(").is_err());
}
