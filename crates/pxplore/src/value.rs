//! Runtime values and their textual representations
//!
//! Every value that can appear in a namespace implements [`Repr`], which
//! carries the two renderings a Python object has: the type-specific
//! `repr()` and the identity-based `object.__repr__` fallback that ignores
//! whatever the type defines.

use std::{borrow::Cow, fmt::Write as _, rc::Rc};

use anyhow::Result;

use crate::namespace::Module;

/// Textual representation capability shared by all inspectable values
pub trait Repr: std::fmt::Debug {
    /// Qualified type name as shown by the identity rendering
    /// (e.g. `bool`, `_sitebuiltins.Quitter`)
    fn type_name(&self) -> Cow<'_, str>;

    /// The type-specific representation.
    ///
    /// User-defined objects may fail here; callers propagate the error.
    fn repr(&self) -> Result<String>;

    /// Identity-based representation, e.g. `<bool object at 0x55d0c1a0>`
    fn identity_repr(&self) -> String {
        format!(
            "<{} object at {:#x}>",
            self.type_name(),
            std::ptr::from_ref(self).addr()
        )
    }
}

/// The interactive-session helpers installed into the built-in namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteHelper {
    Quit,
    Exit,
    Copyright,
    Credits,
    License,
    Help,
}

impl SiteHelper {
    pub const ALL: [Self; 6] = [
        Self::Quit,
        Self::Exit,
        Self::Copyright,
        Self::Credits,
        Self::License,
        Self::Help,
    ];

    /// Name the helper is bound to in the built-in namespace
    pub fn name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Exit => "exit",
            Self::Copyright => "copyright",
            Self::Credits => "credits",
            Self::License => "license",
            Self::Help => "help",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|helper| helper.name() == name)
    }

    fn type_name(self) -> &'static str {
        match self {
            Self::Quit | Self::Exit => "_sitebuiltins.Quitter",
            Self::Copyright | Self::Credits | Self::License => "_sitebuiltins._Printer",
            Self::Help => "_sitebuiltins._Helper",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Quit => "Use quit() or Ctrl-D (i.e. EOF) to exit",
            Self::Exit => "Use exit() or Ctrl-D (i.e. EOF) to exit",
            Self::Copyright => concat!(
                "Copyright (c) 2001-2024 Python Software Foundation.\n",
                "All Rights Reserved.\n",
                "\n",
                "Copyright (c) 2000 BeOpen.com.\n",
                "All Rights Reserved.\n",
                "\n",
                "Copyright (c) 1995-2001 Corporation for National Research Initiatives.\n",
                "All Rights Reserved.\n",
                "\n",
                "Copyright (c) 1991-1995 Stichting Mathematisch Centrum, Amsterdam.\n",
                "All Rights Reserved."
            ),
            Self::Credits => concat!(
                "    Thanks to CWI, CNRI, BeOpen, Zope Corporation, the Python Software\n",
                "    Foundation, and a cast of thousands for supporting Python\n",
                "    development.  See www.python.org for more information."
            ),
            Self::License => "Type license() to see the full license text",
            Self::Help => {
                "Type help() for interactive help, or help(object) for help about object."
            }
        }
    }
}

/// A value bound to a name in some namespace
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Ellipsis,
    NotImplemented,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// A user-defined function, by name
    Function(String),
    /// A function implemented by the runtime, by name
    BuiltinFunction(String),
    /// A class, by qualified name
    Class(String),
    Module(Rc<Module>),
    Helper(SiteHelper),
    /// Any other object with its own representation
    Object(Rc<dyn Repr>),
}

impl Value {
    pub fn object(object: impl Repr + 'static) -> Self {
        Self::Object(Rc::new(object))
    }

    fn address(&self) -> usize {
        std::ptr::from_ref(self).addr()
    }
}

impl Repr for Value {
    fn type_name(&self) -> Cow<'_, str> {
        match self {
            Self::None => Cow::Borrowed("NoneType"),
            Self::Ellipsis => Cow::Borrowed("ellipsis"),
            Self::NotImplemented => Cow::Borrowed("NotImplementedType"),
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::Int(_) => Cow::Borrowed("int"),
            Self::Float(_) => Cow::Borrowed("float"),
            Self::Str(_) => Cow::Borrowed("str"),
            Self::List(_) => Cow::Borrowed("list"),
            Self::Tuple(_) => Cow::Borrowed("tuple"),
            Self::Function(_) => Cow::Borrowed("function"),
            Self::BuiltinFunction(_) => Cow::Borrowed("builtin_function_or_method"),
            Self::Class(_) => Cow::Borrowed("type"),
            Self::Module(module) => module.type_name(),
            Self::Helper(helper) => Cow::Borrowed(helper.type_name()),
            Self::Object(object) => object.type_name(),
        }
    }

    fn repr(&self) -> Result<String> {
        Ok(match self {
            Self::None => "None".to_owned(),
            Self::Ellipsis => "Ellipsis".to_owned(),
            Self::NotImplemented => "NotImplemented".to_owned(),
            Self::Bool(true) => "True".to_owned(),
            Self::Bool(false) => "False".to_owned(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => float_repr(*value),
            Self::Str(text) => str_repr(text),
            Self::List(items) => format!("[{}]", join_reprs(items)?),
            Self::Tuple(items) if items.len() == 1 => format!("({},)", items[0].repr()?),
            Self::Tuple(items) => format!("({})", join_reprs(items)?),
            Self::Function(name) => format!("<function {name} at {:#x}>", self.address()),
            Self::BuiltinFunction(name) => format!("<built-in function {name}>"),
            Self::Class(name) => format!("<class '{name}'>"),
            Self::Module(module) => module.repr()?,
            Self::Helper(helper) => helper.text().to_owned(),
            Self::Object(object) => object.repr()?,
        })
    }

    fn identity_repr(&self) -> String {
        match self {
            Self::Module(module) => module.identity_repr(),
            Self::Object(object) => object.identity_repr(),
            _ => format!("<{} object at {:#x}>", self.type_name(), self.address()),
        }
    }
}

fn join_reprs(items: &[Value]) -> Result<String> {
    let reprs = items.iter().map(Repr::repr).collect::<Result<Vec<_>>>()?;
    Ok(reprs.join(", "))
}

/// Render a float the way Python's `repr` does: shortest round-trip digits,
/// scientific notation with a signed two-digit exponent outside `1e-4..1e16`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Quote a string the way Python's `repr` does
fn str_repr(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if !is_printable(c) => {
                let code = u32::from(c);
                let _ = match code {
                    0..=0xff => write!(out, "\\x{code:02x}"),
                    0x100..=0xffff => write!(out, "\\u{code:04x}"),
                    _ => write!(out, "\\U{code:08x}"),
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Whether `repr` emits `c` as-is: everything except control and format
/// characters, separators other than the ASCII space, and private-use code
/// points. Unassigned code points are treated as printable.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
            | '\u{f0000}'..='\u{10ffff}'
    )
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

impl From<Rc<Module>> for Value {
    fn from(module: Rc<Module>) -> Self {
        Self::Module(module)
    }
}

impl From<Module> for Value {
    fn from(module: Module) -> Self {
        Self::Module(Rc::new(module))
    }
}

impl From<SiteHelper> for Value {
    fn from(helper: SiteHelper) -> Self {
        Self::Helper(helper)
    }
}
