//! The built-in namespace
//!
//! Builds the `builtins` module for a given Python minor version from ruff's
//! builtin-name database. Each name is bound to a value of the right kind so
//! that representations look like the ones the interpreter would print.

use ruff_python_stdlib::builtins::python_builtins;

use crate::{
    namespace::{BUILTINS_MODULE_NAME, Module, Namespace},
    value::{SiteHelper, Value},
};

const MODULE_DOC: &str = "Built-in functions, types, exceptions, and other objects.";

/// Lower-case builtins that are classes rather than functions
const BUILTIN_CLASSES: &[&str] = &[
    "bool",
    "bytearray",
    "bytes",
    "classmethod",
    "complex",
    "dict",
    "enumerate",
    "filter",
    "float",
    "frozenset",
    "int",
    "list",
    "map",
    "memoryview",
    "object",
    "property",
    "range",
    "reversed",
    "set",
    "slice",
    "staticmethod",
    "str",
    "super",
    "tuple",
    "type",
    "zip",
];

/// Build the `builtins` module for Python `3.<python_version>`
pub fn module(python_version: u8) -> Module {
    let mut namespace = Namespace::new()
        .with("__name__", BUILTINS_MODULE_NAME)
        .with("__doc__", MODULE_DOC)
        .with("__package__", "");

    for name in python_builtins(python_version, false) {
        if !namespace.contains(name) {
            namespace.insert(name, builtin_value(name));
        }
    }

    // The interactive helpers are installed by `site` after everything else
    for helper in SiteHelper::ALL {
        if !namespace.contains(helper.name()) {
            namespace.insert(helper.name(), helper);
        }
    }

    log::debug!(
        "Built builtins module for Python 3.{python_version} with {} names",
        namespace.len()
    );
    Module::new(BUILTINS_MODULE_NAME, namespace)
}

fn builtin_value(name: &str) -> Value {
    if let Some(helper) = SiteHelper::from_name(name) {
        return Value::Helper(helper);
    }

    match name {
        "None" => Value::None,
        "Ellipsis" => Value::Ellipsis,
        "NotImplemented" => Value::NotImplemented,
        "True" | "__debug__" => Value::Bool(true),
        "False" => Value::Bool(false),
        "__spec__" => Value::None,
        "__loader__" => Value::Class("_frozen_importlib.BuiltinImporter".to_owned()),
        _ if BUILTIN_CLASSES.contains(&name) => Value::Class(name.to_owned()),
        _ if name.starts_with(|c: char| c.is_ascii_uppercase()) => Value::Class(name.to_owned()),
        _ => Value::BuiltinFunction(name.to_owned()),
    }
}
