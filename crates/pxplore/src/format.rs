//! Symbol formatters
//!
//! Both formatters render `<name> = <repr>`. The builtins-aware one swaps in
//! the identity representation for names in the policy's non-printable set.

use anyhow::Result;

use crate::{config::Policy, namespace::Module, value::Repr};

/// Render `name = repr(value)`
pub fn format_symbol(name: &str, value: &(impl Repr + ?Sized)) -> Result<String> {
    Ok(format!("{name} = {}", value.repr()?))
}

/// Render `name = repr(value)`, using the identity representation for
/// non-printable built-in names
pub fn format_symbol_builtins(
    name: &str,
    value: &(impl Repr + ?Sized),
    policy: &Policy,
) -> Result<String> {
    let rendered = if policy.is_non_printable(name) {
        value.identity_repr()
    } else {
        value.repr()?
    };
    Ok(format!("{name} = {rendered}"))
}

/// Formatter selected for a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolFormatter {
    Standard,
    Builtins,
}

impl SymbolFormatter {
    /// The builtins-aware formatter for the built-in module, the standard one
    /// for everything else
    pub fn for_module(module: &Module) -> Self {
        if module.is_builtins() {
            Self::Builtins
        } else {
            Self::Standard
        }
    }

    pub fn format(
        self,
        name: &str,
        value: &(impl Repr + ?Sized),
        policy: &Policy,
    ) -> Result<String> {
        match self {
            Self::Standard => format_symbol(name, value),
            Self::Builtins => format_symbol_builtins(name, value, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        namespace::Namespace,
        value::{SiteHelper, Value},
    };

    #[test]
    fn test_standard_formatter() {
        assert_eq!(format_symbol("x", &Value::Int(1)).unwrap(), "x = 1");
        assert_eq!(format_symbol("flag", &Value::Bool(true)).unwrap(), "flag = True");
        assert_eq!(
            format_symbol("name", &Value::from("pxplore")).unwrap(),
            "name = 'pxplore'"
        );
    }

    #[test]
    fn test_builtins_formatter_substitutes_identity_for_true() {
        let policy = Policy::default();
        let value = Value::Bool(true);
        let rendered = format_symbol_builtins("True", &value, &policy).unwrap();

        assert_eq!(rendered, format!("True = {}", value.identity_repr()));
        assert!(rendered.starts_with("True = <bool object at 0x"));
        assert_ne!(rendered, "True = True");
    }

    #[test]
    fn test_builtins_formatter_keeps_standard_repr_for_functions() {
        let policy = Policy::default();
        let len = Value::BuiltinFunction("len".to_owned());
        assert_eq!(
            format_symbol_builtins("len", &len, &policy).unwrap(),
            "len = <built-in function len>"
        );
    }

    #[test]
    fn test_builtins_formatter_shortens_site_helpers() {
        let policy = Policy::default();
        let copyright = Value::Helper(SiteHelper::Copyright);
        let rendered = format_symbol_builtins("copyright", &copyright, &policy).unwrap();
        assert!(rendered.starts_with("copyright = <_sitebuiltins._Printer object at 0x"));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_membership_is_by_name_not_value() {
        let policy = Policy::default();
        let value = Value::Bool(true);
        assert_eq!(
            format_symbol_builtins("enabled", &value, &policy).unwrap(),
            "enabled = True"
        );
    }

    #[test]
    fn test_formatter_selection() {
        let builtins = Module::new("builtins", Namespace::new());
        let app = Module::new("app", Namespace::new());
        assert_eq!(SymbolFormatter::for_module(&builtins), SymbolFormatter::Builtins);
        assert_eq!(SymbolFormatter::for_module(&app), SymbolFormatter::Standard);

        let policy = Policy::default();
        assert_eq!(
            SymbolFormatter::Standard
                .format("None", &Value::None, &policy)
                .unwrap(),
            "None = None"
        );
    }
}
