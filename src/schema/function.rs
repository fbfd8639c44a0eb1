//! Function-valued fields.

use std::sync::Arc;

use stillwater::Validation;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{fail, ExtractResult};
use crate::value::Value;

use super::traits::Processor;

/// Post-processes the return value of a wrapped callback.
pub type Retriever = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Accepts callables and wraps them.
///
/// The extracted function passes at most `arg_names.len()` arguments to the
/// original callable and hands its return value to the retriever. Anything
/// other than a function fails with `Not a function`.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, Schema, Value};
///
/// let on_action = Schema::func(vec!["api".to_string()], |out| out);
/// let count_args = Value::function(|args| Value::from(args.len() as f64));
///
/// let wrapped = extract(&on_action, &count_args).into_result().unwrap();
/// let f = wrapped.as_function().unwrap();
/// assert_eq!(f.call(&[Value::Null, Value::Null, Value::Null]), Value::Number(1.0));
/// ```
#[derive(Clone)]
pub struct FunctionSchema {
    arg_names: Vec<String>,
    retriever: Retriever,
}

impl FunctionSchema {
    pub fn new(arg_names: Vec<String>, retriever: Retriever) -> Self {
        Self {
            arg_names,
            retriever,
        }
    }

    pub fn arity(&self) -> usize {
        self.arg_names.len()
    }
}

impl Processor for FunctionSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        match value {
            Value::Function(f) => {
                let f = f.clone();
                let arity = self.arity();
                let retriever = Arc::clone(&self.retriever);
                Validation::Success(Value::function(move |args| {
                    let allowed = &args[..args.len().min(arity)];
                    retriever(f.call(allowed))
                }))
            }
            _ => fail(SchemaError::custom(path.clone(), "Not a function")),
        }
    }

    fn describe(&self) -> String {
        "function".to_string()
    }
}
