//! Namespaces and modules
//!
//! A [`Namespace`] is an insertion-ordered name → value mapping: the shape of
//! a frame's locals, a module's globals, and a module's attribute dictionary.

use std::{borrow::Cow, path::PathBuf};

use anyhow::Result;

use crate::{
    types::FxIndexMap,
    value::{Repr, Value},
};

/// Reserved name of the module that holds the built-in namespace
pub const BUILTINS_MODULE_NAME: &str = "builtins";

/// Name under which a global namespace references the built-in module
pub const BUILTINS_KEY: &str = "__builtins__";

/// Insertion-ordered mapping from names to values
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: FxIndexMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`.
    ///
    /// Rebinding an existing name keeps its original position, like assigning
    /// to an existing dictionary key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Builder-style [`Namespace::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Names and values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut namespace = Self::new();
        for (name, value) in iter {
            namespace.insert(name, value);
        }
        namespace
    }
}

/// A module: a name, an optional source file and its attribute namespace
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    file: Option<PathBuf>,
    namespace: Namespace,
}

impl Module {
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            name: name.into(),
            file: None,
            namespace,
        }
    }

    /// Attach the source file the module was loaded from
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Whether this is the runtime's built-in namespace module
    pub fn is_builtins(&self) -> bool {
        self.name == BUILTINS_MODULE_NAME
    }
}

impl Repr for Module {
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("module")
    }

    fn repr(&self) -> Result<String> {
        Ok(match &self.file {
            Some(file) => format!("<module '{}' from '{}'>", self.name, file.display()),
            None => format!("<module '{}' (built-in)>", self.name),
        })
    }
}
