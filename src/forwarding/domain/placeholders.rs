//! Named values substituted into message templates.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type LazyValue = Arc<dyn Fn() -> String + Send + Sync>;

/// A placeholder value, either fixed or computed when a template uses it.
#[derive(Clone)]
pub enum PlaceholderValue {
    /// A value known up front.
    Static(String),
    /// A value computed on demand.
    Lazy(LazyValue),
}

impl PlaceholderValue {
    /// Returns the value, computing it if lazy.
    #[must_use]
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            Self::Static(value) => Cow::Borrowed(value),
            Self::Lazy(compute) => Cow::Owned(compute()),
        }
    }
}

impl fmt::Debug for PlaceholderValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => formatter.debug_tuple("Static").field(value).finish(),
            Self::Lazy(_) => formatter.write_str("Lazy(..)"),
        }
    }
}

/// Placeholder values keyed by name (without the surrounding `%`).
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: BTreeMap<String, PlaceholderValue>,
}

impl Placeholders {
    /// Creates an empty placeholder set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(name.into(), PlaceholderValue::Static(value.into()));
    }

    /// Sets a value computed only when a template references it.
    pub fn insert_lazy(
        &mut self,
        name: impl Into<String>,
        compute: impl Fn() -> String + Send + Sync + 'static,
    ) {
        self.values
            .insert(name.into(), PlaceholderValue::Lazy(Arc::new(compute)));
    }

    /// Returns the value registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PlaceholderValue> {
        self.values.get(name)
    }

    /// Returns the resolved value registered under `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(PlaceholderValue::resolve)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of registered values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no values are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
