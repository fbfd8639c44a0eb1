//! Lazily built and self-referential schemas.
//!
//! This module provides three ways of deferring schema construction:
//!
//! - [`ThunkSchema`]: builds its delegate on first use and caches it
//! - [`ValueThunkSchema`]: asks for its delegate on every use
//! - [`RecursiveSchema`]: built once around a weak handle to itself
//!
//! Thunks are what make recursive schema definitions possible: a factory that
//! refers back to the function producing it is only called when input of that
//! depth actually shows up.

use std::any::TypeId;
use std::cell::RefCell;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use crate::error::SchemaError;
use crate::path::JsonPath;
use crate::validation::{fail, ExtractResult};
use crate::value::Value;

use super::traits::{shared, Processor, SharedProcessor};

type Factory = Arc<dyn Fn() -> SharedProcessor + Send + Sync>;

/// Identifies thunks built by the same factory: the factory's closure type
/// plus the thunk's label.
type DescribeKey = (TypeId, String);

thread_local! {
    static DESCRIBING: RefCell<Vec<DescribeKey>> = const { RefCell::new(Vec::new()) };
}

/// Pops the innermost describe entry, also when rendering unwinds.
struct DescribeFrame;

impl Drop for DescribeFrame {
    fn drop(&mut self) {
        DESCRIBING.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Renders `render()` unless a thunk with the same `key` is already being
/// described further up this thread's stack.
fn describe_once(key: DescribeKey, render: impl FnOnce() -> String) -> String {
    let reentered = DESCRIBING.with(|stack| stack.borrow().contains(&key));
    if reentered {
        return format!("thunk({})", key.1);
    }

    DESCRIBING.with(|stack| stack.borrow_mut().push(key));
    let _frame = DescribeFrame;
    render()
}

/// A schema built on first use.
///
/// The factory runs at most once, even when several threads hit an
/// uninitialized thunk at the same time; everyone else waits for and then
/// shares the first result.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, field, Processor, Schema, ThunkSchema, Value};
/// use serde_json::json;
///
/// fn menu() -> ThunkSchema {
///     Schema::thunk("menu", || {
///         Schema::obj_of(vec![
///             field::strict_string("text"),
///             field::option_of("submenu", Schema::arr_of(menu())),
///         ])
///     })
/// }
///
/// let input = Value::from(json!({
///     "text": "File",
///     "submenu": [{"text": "Open"}, {"text": "Recent", "submenu": [{"text": 4}]}]
/// }));
///
/// let errors = extract(&menu(), &input).into_result().unwrap_err();
/// assert_eq!(
///     errors.first().path.to_string(),
///     "submenu > [1] > submenu > [0] > text"
/// );
/// assert!(menu().describe().contains("thunk(menu)"));
/// ```
pub struct ThunkSchema {
    description: String,
    origin: TypeId,
    factory: Factory,
    cell: OnceCell<SharedProcessor>,
}

impl ThunkSchema {
    /// Creates a thunk whose delegate is built by `factory` on first use.
    ///
    /// Thunks created from the same `factory` closure (the same place in the
    /// source) with the same description count as one schema when describing,
    /// which is what lets self-referential thunks describe themselves.
    pub fn new<F, P>(description: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: Processor + 'static,
    {
        Self {
            description: description.into(),
            origin: TypeId::of::<F>(),
            factory: Arc::new(move || shared(factory())),
            cell: OnceCell::new(),
        }
    }

    /// Returns the delegate, building it if this is the first use.
    pub fn force(&self) -> &SharedProcessor {
        self.cell.get_or_init(|| {
            tracing::trace!(schema = %self.description, "instantiating lazy schema");
            (self.factory)()
        })
    }

    pub fn is_instantiated(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Processor for ThunkSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        self.force().extract_prop(path, value)
    }

    fn describe(&self) -> String {
        describe_once((self.origin, self.description.clone()), || {
            self.force().describe()
        })
    }
}

/// A schema whose delegate is fetched anew on every call.
pub struct ValueThunkSchema {
    get_delegate: Factory,
}

impl ValueThunkSchema {
    pub fn new(get_delegate: Factory) -> Self {
        Self { get_delegate }
    }
}

impl Processor for ValueThunkSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        (self.get_delegate)().extract_prop(path, value)
    }

    fn describe(&self) -> String {
        (self.get_delegate)().describe()
    }
}

/// A schema that contains itself.
///
/// Built with [`Schema::recursive`](super::Schema::recursive): the builder
/// receives a [`SelfRef`] standing in for the schema being built. The handle
/// is weak, so the schema does not keep itself alive.
///
/// # Example
///
/// ```rust
/// use boulder::{extract, field, Schema, Value};
/// use serde_json::json;
///
/// let tree = Schema::recursive("tree", |node| {
///     Schema::obj_of(vec![
///         field::strict_number("value"),
///         field::defaulted_array_of("children", Vec::new(), node),
///     ])
/// });
///
/// let input = Value::from(json!({"value": 1, "children": [{"value": 2}]}));
/// assert!(extract(&tree, &input).is_success());
/// ```
pub struct RecursiveSchema {
    description: String,
    inner: SharedProcessor,
}

impl RecursiveSchema {
    pub fn new<F, P>(description: impl Into<String>, build: F) -> Arc<Self>
    where
        F: FnOnce(SelfRef) -> P,
        P: Processor + 'static,
    {
        let description = description.into();
        Arc::new_cyclic(|weak: &Weak<RecursiveSchema>| {
            let handle = SelfRef {
                target: weak.clone(),
                description: description.clone(),
            };
            RecursiveSchema {
                description,
                inner: Arc::new(build(handle)),
            }
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Processor for RecursiveSchema {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        self.inner.extract_prop(path, value)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

/// A weak handle to the [`RecursiveSchema`] under construction.
#[derive(Clone)]
pub struct SelfRef {
    target: Weak<RecursiveSchema>,
    description: String,
}

impl Processor for SelfRef {
    fn extract_prop(&self, path: &JsonPath, value: &Value) -> ExtractResult<Value> {
        match self.target.upgrade() {
            Some(schema) => schema.extract_prop(path, value),
            None => {
                tracing::warn!(schema = %self.description, "recursive schema used after it was dropped");
                fail(SchemaError::custom(
                    path.clone(),
                    format!("Recursive schema \"{}\" is no longer available", self.description),
                ))
            }
        }
    }

    fn describe(&self) -> String {
        format!("recursive({})", self.description)
    }
}
