//! Execution frames
//!
//! A [`Frame`] is an explicit, caller-built snapshot of one function call: its
//! source location, its locals and a shared reference to the global namespace
//! of the module it runs in. Callers that track nested calls keep them on a
//! [`CallStack`], whose innermost frame stands in for "the caller's frame".

use std::{
    fmt,
    io::{self, Write},
    rc::Rc,
};

use anyhow::{Result, anyhow, bail};

use crate::{
    config::PrintOptions,
    namespace::{BUILTINS_KEY, Module, Namespace},
    printer,
    value::{Repr, Value},
};

/// Where a frame is currently executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File \"{}\", line {}, in {}",
            self.file, self.line, self.function
        )
    }
}

/// Snapshot of an active function invocation
#[derive(Debug, Clone)]
pub struct Frame {
    location: SourceLocation,
    locals: Namespace,
    globals: Rc<Namespace>,
}

impl Frame {
    pub fn new(location: SourceLocation, globals: Rc<Namespace>) -> Self {
        Self {
            location,
            locals: Namespace::new(),
            globals,
        }
    }

    #[must_use]
    pub fn with_locals(mut self, locals: Namespace) -> Self {
        self.locals = locals;
        self
    }

    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn locals(&self) -> &Namespace {
        &self.locals
    }

    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    /// The built-in module reachable through the globals' `__builtins__` entry
    pub fn builtins(&self) -> Result<&Module> {
        let value = self
            .globals
            .get(BUILTINS_KEY)
            .ok_or_else(|| anyhow!("KeyError: '{BUILTINS_KEY}'"))?;
        match value {
            Value::Module(module) => Ok(module.as_ref()),
            other => bail!(
                "AttributeError: '{}' object has no attribute '__dict__'",
                other.type_name()
            ),
        }
    }
}

/// Frames of the calls currently in progress, outermost first
#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// The innermost frame
    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from innermost to outermost
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }

    /// Write the symbols of `frame`, or of the innermost frame when `None`
    pub fn write_symbols<W: Write + ?Sized>(
        &self,
        out: &mut W,
        frame: Option<&Frame>,
        options: &PrintOptions,
    ) -> Result<()> {
        let frame = match frame {
            Some(frame) => frame,
            None => self
                .current()
                .ok_or_else(|| anyhow!("No active frame on the call stack"))?,
        };
        printer::write_symbols(out, frame, options)
    }

    /// [`CallStack::write_symbols`] to standard output
    pub fn print_symbols(&self, frame: Option<&Frame>, options: &PrintOptions) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_symbols(&mut out, frame, options)
    }
}

#[doc(hidden)]
pub fn enclosing_function(path: &str) -> &str {
    let mut path = path.strip_suffix("::here").unwrap_or(path);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Name of the function this macro is expanded in
#[macro_export]
macro_rules! function_name {
    () => {{
        fn here() {}
        $crate::frame::enclosing_function(::std::any::type_name_of_val(&here))
    }};
}

/// Capture the current frame.
///
/// Takes the global namespace (an `Rc<Namespace>`) and, after a `;`, the
/// local variables to record. Each local is cloned and converted with
/// `Value::from`.
///
/// ```
/// use std::rc::Rc;
/// use pxplore::{Namespace, frame};
///
/// let globals = Rc::new(Namespace::new().with("VERSION", "1.0"));
/// let x = 1;
/// let name = "pxplore";
/// let frame = frame!(globals; x, name);
/// assert_eq!(frame.locals().len(), 2);
/// ```
#[macro_export]
macro_rules! frame {
    ($globals:expr $(; $($local:ident),* $(,)?)?) => {{
        #[allow(unused_mut)]
        let mut locals = $crate::Namespace::new();
        $($(
            locals.insert(stringify!($local), $crate::Value::from($local.clone()));
        )*)?
        $crate::Frame::new(
            $crate::SourceLocation::new(file!(), line!(), $crate::function_name!()),
            ::std::rc::Rc::clone(&$globals),
        )
        .with_locals(locals)
    }};
}
