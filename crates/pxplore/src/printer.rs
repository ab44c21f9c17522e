//! Frame and module symbol printers
//!
//! Frame output is a location header followed by up to three blocks, always
//! in this order: built-ins, globals, locals. A name bound in an inner scope
//! hides the same name in every outer scope, so each name is printed at most
//! once. Module output is the module's representation followed by its
//! attributes.
//!
//! Representation failures are not caught: they abort the traversal and
//! whatever was already written stays in the sink.

use std::io::{self, Write};

use anyhow::Result;
use log::{debug, trace};

use crate::{
    config::PrintOptions,
    format::{SymbolFormatter, format_symbol, format_symbol_builtins},
    frame::Frame,
    namespace::Module,
    value::Repr,
};

/// Scope a printed frame symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Builtin,
    Global,
    Local,
}

impl Scope {
    /// Line tag, padded so that symbol names line up
    pub fn tag(self) -> &'static str {
        match self {
            // "buildin" is the established spelling of this tag
            Self::Builtin => "buildin: ",
            Self::Global => "global:  ",
            Self::Local => "local:   ",
        }
    }
}

/// Write the symbols visible in `frame` to `out`
pub fn write_symbols<W: Write + ?Sized>(
    out: &mut W,
    frame: &Frame,
    options: &PrintOptions,
) -> Result<()> {
    let location = frame.location();
    debug!(
        "Printing symbols of {}:{} in {} (builtins: {}, globals: {}, hidden: {})",
        location.file,
        location.line,
        location.function,
        options.show_builtins,
        options.show_globals,
        options.show_hidden
    );

    writeln!(out, "{location}")?;

    let locals = frame.locals();
    let globals = frame.globals();
    let alignment = &options.alignment;

    if options.show_builtins {
        let builtins = frame.builtins()?;
        for (name, value) in builtins.namespace().iter() {
            if locals.contains(name) || globals.contains(name) {
                trace!("Skipping builtin '{name}': shadowed");
                continue;
            }
            if !options.is_visible(name) {
                trace!("Skipping builtin '{name}': hidden");
                continue;
            }
            let symbol = format_symbol_builtins(name, value, &options.policy)?;
            writeln!(out, "{alignment}{}{symbol}", Scope::Builtin.tag())?;
        }
    }

    if options.show_globals {
        for (name, value) in globals.iter() {
            if locals.contains(name) {
                trace!("Skipping global '{name}': shadowed by local");
                continue;
            }
            if !options.is_visible(name) {
                trace!("Skipping global '{name}': hidden");
                continue;
            }
            let symbol = format_symbol(name, value)?;
            writeln!(out, "{alignment}{}{symbol}", Scope::Global.tag())?;
        }
    }

    for (name, value) in locals.iter() {
        if !options.is_visible(name) {
            trace!("Skipping local '{name}': hidden");
            continue;
        }
        let symbol = format_symbol(name, value)?;
        writeln!(out, "{alignment}{}{symbol}", Scope::Local.tag())?;
    }

    Ok(())
}

/// [`write_symbols`] to standard output
pub fn print_symbols(frame: &Frame, options: &PrintOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_symbols(&mut out, frame, options)
}

/// Write the representation and attributes of `module` to `out`.
///
/// Only `show_hidden`, `alignment` and the naming policy of `options` apply.
pub fn write_module_symbols<W: Write + ?Sized>(
    out: &mut W,
    module: &Module,
    options: &PrintOptions,
) -> Result<()> {
    debug!(
        "Printing symbols of module '{}' (hidden: {})",
        module.name(),
        options.show_hidden
    );

    writeln!(out, "{}", module.repr()?)?;

    let formatter = SymbolFormatter::for_module(module);
    for (name, value) in module.namespace().iter() {
        if !options.is_visible(name) {
            trace!("Skipping attribute '{name}': hidden");
            continue;
        }
        let symbol = formatter.format(name, value, &options.policy)?;
        writeln!(out, "{}{symbol}", options.alignment)?;
    }

    Ok(())
}

/// [`write_module_symbols`] to standard output
pub fn print_module_symbols(module: &Module, options: &PrintOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_module_symbols(&mut out, module, options)
}
