//! Frame snapshots loaded from TOML
//!
//! A snapshot describes one frame as data:
//!
//! ```toml
//! file = "app.py"
//! line = 12
//! function = "main"
//!
//! [globals]
//! VERSION = "1.0"
//!
//! [locals]
//! x = 1
//! ```
//!
//! Key order in the `globals` and `locals` tables is kept as written.

use std::{fs, path::Path, rc::Rc};

use anyhow::{Context, Result, bail, ensure};
use indexmap::IndexMap;
use ruff_python_stdlib::identifiers::is_identifier;
use serde::Deserialize;

use crate::{
    frame::{Frame, SourceLocation},
    namespace::{BUILTINS_KEY, Module, Namespace},
    value::Value,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameSnapshot {
    pub file: String,
    #[serde(default = "default_line")]
    pub line: u32,
    #[serde(default = "default_function")]
    pub function: String,
    /// Value of `__name__` in the frame's globals
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default)]
    pub globals: IndexMap<String, toml::Value>,
    #[serde(default)]
    pub locals: IndexMap<String, toml::Value>,
}

fn default_line() -> u32 {
    1
}

fn default_function() -> String {
    "<module>".to_owned()
}

fn default_module() -> String {
    "__main__".to_owned()
}

impl FrameSnapshot {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse frame snapshot")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid snapshot file: {}", path.display()))
    }

    /// Build a frame whose globals reference `builtins` through `__builtins__`.
    ///
    /// `__name__` and `__builtins__` are only added when the snapshot does not
    /// bind them itself.
    pub fn into_frame(self, builtins: Rc<Module>) -> Result<Frame> {
        let mut globals = namespace_from_table(self.globals, "global")?;
        if !globals.contains("__name__") {
            globals.insert("__name__", self.module);
        }
        if !globals.contains(BUILTINS_KEY) {
            globals.insert(BUILTINS_KEY, builtins);
        }
        let locals = namespace_from_table(self.locals, "local")?;

        log::debug!(
            "Loaded snapshot of {} with {} globals and {} locals",
            self.file,
            globals.len(),
            locals.len()
        );

        let location = SourceLocation::new(self.file, self.line, self.function);
        Ok(Frame::new(location, Rc::new(globals)).with_locals(locals))
    }
}

fn namespace_from_table(table: IndexMap<String, toml::Value>, scope: &str) -> Result<Namespace> {
    table
        .into_iter()
        .map(|(name, value)| {
            ensure!(
                is_identifier(&name),
                "Invalid {scope} name '{name}': not a Python identifier"
            );
            let value =
                convert(value).with_context(|| format!("Invalid value for {scope} '{name}'"))?;
            Ok((name, value))
        })
        .collect()
}

fn convert(value: toml::Value) -> Result<Value> {
    Ok(match value {
        toml::Value::String(text) => Value::Str(text),
        toml::Value::Integer(number) => Value::Int(number),
        toml::Value::Float(number) => Value::Float(number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::Str(datetime.to_string()),
        toml::Value::Array(items) => {
            Value::List(items.into_iter().map(convert).collect::<Result<_>>()?)
        }
        toml::Value::Table(_) => bail!("tables cannot be used as values"),
    })
}
