//! Print options and naming policy
//!
//! Options are plain data: constructed with [`Default`], loaded from TOML, or
//! both, with command-line flags layered on top by the binary.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::FxIndexSet;

/// Built-in names whose standard representation is misleading or verbose
pub const DEFAULT_NON_PRINTABLE: [&str; 11] = [
    "quit",
    "exit",
    "copyright",
    "credits",
    "license",
    "help",
    "None",
    "Ellipsis",
    "NotImplemented",
    "False",
    "True",
];

/// Leading character that marks a name as non-public
pub const DEFAULT_HIDDEN_MARKER: char = '_';

/// Python minor version (3.x) used to populate the built-in namespace
pub const DEFAULT_PYTHON_VERSION: u8 = 13;

/// Naming conventions of the inspected runtime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Policy {
    pub hidden_marker: char,
    pub non_printable: FxIndexSet<String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            hidden_marker: DEFAULT_HIDDEN_MARKER,
            non_printable: DEFAULT_NON_PRINTABLE
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }
}

impl Policy {
    pub fn is_hidden(&self, name: &str) -> bool {
        name.starts_with(self.hidden_marker)
    }

    pub fn is_non_printable(&self, name: &str) -> bool {
        self.non_printable.contains(name)
    }
}

/// Visibility flags and layout for one print call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PrintOptions {
    /// Include the global scope in frame output
    pub show_globals: bool,
    /// Include names starting with the hidden marker
    pub show_hidden: bool,
    /// Include the built-in scope in frame output
    pub show_builtins: bool,
    /// Prefix of every symbol line
    pub alignment: String,
    pub python_version: u8,
    /// The `[policy]` table
    pub policy: Policy,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            show_globals: true,
            show_hidden: false,
            show_builtins: false,
            alignment: "  ".to_owned(),
            python_version: DEFAULT_PYTHON_VERSION,
            policy: Policy::default(),
        }
    }
}

impl PrintOptions {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse print options")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Whether `name` passes the hidden-name filter
    pub fn is_visible(&self, name: &str) -> bool {
        self.show_hidden || !self.policy.is_hidden(name)
    }
}
