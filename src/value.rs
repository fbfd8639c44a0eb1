//! Dynamic values flowing through extraction.
//!
//! [`Value`] models both the untyped input handed to a processor and the
//! normalized value it produces. It is a superset of JSON: besides the usual
//! scalars, arrays and (insertion-ordered) objects it can hold callables, and
//! the optional-valued output of optional presence policies.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as Json;

/// Objects with more keys than this are not pretty printed in diagnostics.
pub const MAX_PRETTY_KEYS: usize = 100;

/// An insertion-ordered object.
pub type Object = IndexMap<String, Value>;

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A shareable function value.
///
/// Equality is identity: two callables are equal only if they wrap the same
/// allocation.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    /// Wraps a closure as a callable value.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the function with the given arguments.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A dynamically shaped value.
///
/// # Example
///
/// ```rust
/// use boulder::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"menu": {"items": [1, 2]}}));
/// assert_eq!(value.get("menu").map(Value::type_name), Some("object"));
/// assert!(value.get("toolbar").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Function(Callable),
    /// The result of an optional field: `None` when the key was absent.
    Optional(Option<Box<Value>>),
}

impl Value {
    /// Creates an empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Creates a present optional.
    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Box::new(value)))
    }

    /// Creates an absent optional.
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Wraps a closure as a function value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(Callable::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Callable> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Returns `Some(inner)` if this is an optional, where `inner` is the
    /// wrapped value when present.
    pub fn as_optional(&self) -> Option<Option<&Value>> {
        match self {
            Value::Optional(opt) => Some(opt.as_deref()),
            _ => None,
        }
    }

    /// Looks up a key, treating `null` values and non-objects as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()
            .and_then(|obj| obj.get(key))
            .filter(|v| !v.is_null())
    }

    /// Returns the keys that carry a non-null value.
    pub fn set_keys(&self) -> Vec<&str> {
        match self {
            Value::Object(obj) => obj
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the name of this value's type as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Optional(_) => "optional",
        }
    }

    /// Converts to JSON. Functions and absent optionals become `null`.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null | Value::Function(_) | Value::Optional(None) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(obj) => Json::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Optional(Some(inner)) => inner.to_json(),
        }
    }
}

fn number_to_json(n: f64) -> Json {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Json::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Json::Null, Json::Number)
    }
}

/// Deep merges `overlay` onto `base`.
///
/// Nested objects are merged key by key; for everything else the overlay
/// wins. The result is always an object: a non-object `base` contributes no
/// keys, and a non-object `overlay` leaves `base` untouched.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.as_object().cloned().unwrap_or_default();
    if let Value::Object(over) = overlay {
        for (key, value) in over {
            let next = match (merged.get(key), value) {
                (Some(existing @ Value::Object(_)), Value::Object(_)) => {
                    deep_merge(existing, value)
                }
                _ => value.clone(),
            };
            merged.insert(key.clone(), next);
        }
    }
    Value::Object(merged)
}

/// Pretty prints a value for diagnostics.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Object(obj) if obj.len() > MAX_PRETTY_KEYS => " removed due to size".to_string(),
        _ => serde_json::to_string_pretty(&value.to_json())
            .unwrap_or_else(|_| value.type_name().to_string()),
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Value::Function(f)
    }
}
