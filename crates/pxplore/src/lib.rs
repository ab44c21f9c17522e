//! Print the variable bindings visible in a frame or module.
//!
//! Frames and modules are explicit symbol tables built by the caller: a
//! [`Frame`] holds its locals and a shared global [`Namespace`], and reaches
//! the built-in namespace through the `__builtins__` global. The printers
//! walk these tables in insertion order, apply the hidden-name filter and
//! shadowing rules, and write one `name = repr` line per symbol.

pub mod builtins;
pub mod config;
pub mod format;
pub mod frame;
pub mod namespace;
pub mod printer;
pub mod snapshot;
pub mod types;
pub mod value;

pub use config::{Policy, PrintOptions};
pub use format::{SymbolFormatter, format_symbol, format_symbol_builtins};
pub use frame::{CallStack, Frame, SourceLocation};
pub use namespace::{Module, Namespace};
pub use printer::{print_module_symbols, print_symbols, write_module_symbols, write_symbols};
pub use value::{Repr, SiteHelper, Value};
