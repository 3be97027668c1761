//! Classification of options-object entries and dispatch to their handlers.

use swc_ecma_ast::{ArrowExpr, Expr, Function, Ident, Lit, ObjectLit, Prop, PropName, PropOrSpread};
use tracing::{debug, warn};

use crate::ast::{function_from_arrow, ident_name, key_name, unwrap_paren};
use crate::builder::{class_name_from, ClassBuilder};
use crate::error::TransformError;
use crate::{computed, data, methods, props, registry, watch};

/// Hooks copied onto the class as plain methods.
///
/// Covers the Vue 2 lifecycle, Vue Router navigation guards and the
/// mini-program lifecycle used by uni-app and mpvue.
pub const LIFECYCLE_HOOKS: &[&str] = &[
    "beforeCreate",
    "created",
    "beforeMount",
    "mounted",
    "beforeUpdate",
    "updated",
    "activated",
    "deactivated",
    "beforeDestroy",
    "destroyed",
    "errorCaptured",
    "beforeRouteEnter",
    "beforeRouteUpdate",
    "beforeRouteLeave",
    "onLoad",
    "onShow",
    "onReady",
    "onHide",
    "onUnload",
    "onLaunch",
    "onPullDownRefresh",
    "onReachBottom",
    "onShareAppMessage",
    "onPageScroll",
];

/// The recognized keys of an options object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Props,
    Name,
    Methods,
    Computed,
    Watch,
    Mixins,
    Components,
    Data,
    Lifecycle,
}

impl OptionKey {
    /// Classifies an options-object key. Unknown keys yield `None`.
    pub fn classify(key: &str) -> Option<Self> {
        let option = match key {
            "props" => Self::Props,
            "name" => Self::Name,
            "methods" => Self::Methods,
            "computed" => Self::Computed,
            "watch" => Self::Watch,
            "mixins" => Self::Mixins,
            "components" => Self::Components,
            "data" => Self::Data,
            hook if LIFECYCLE_HOOKS.contains(&hook) => Self::Lifecycle,
            _ => return None,
        };
        Some(option)
    }
}

/// The value side of an object-literal entry.
#[derive(Debug, Clone, Copy)]
pub(crate) enum EntryValue<'a> {
    /// `key: value`
    Expr(&'a Expr),
    /// `key() {}`
    Method(&'a Function),
    /// `key`
    Shorthand(&'a Ident),
}

/// One `key: value`, `key() {}` or `key` entry of an object literal.
#[derive(Debug, Clone)]
pub(crate) struct Entry<'a> {
    pub key: PropName,
    pub value: EntryValue<'a>,
}

impl<'a> Entry<'a> {
    /// Reads an entry, returning `None` for getters, setters and assignment
    /// patterns.
    pub fn from_prop(prop: &'a Prop) -> Option<Self> {
        let (key, value) = match prop {
            Prop::KeyValue(kv) => (kv.key.clone(), EntryValue::Expr(&kv.value)),
            Prop::Method(method) => (method.key.clone(), EntryValue::Method(&method.function)),
            Prop::Shorthand(ident) => (
                PropName::Ident(ident_name(ident.sym.as_str())),
                EntryValue::Shorthand(ident),
            ),
            _ => return None,
        };
        Some(Self { key, value })
    }

    pub fn name(&self) -> Option<&str> {
        key_name(&self.key)
    }

    /// The name used in diagnostics.
    pub fn display_name(&self) -> String {
        self.name().unwrap_or("[computed]").to_string()
    }

    /// The value expression with parentheses removed, unless the entry is a
    /// method.
    pub fn expr(&self) -> Option<&'a Expr> {
        match self.value {
            EntryValue::Expr(expr) => Some(unwrap_paren(expr)),
            _ => None,
        }
    }

    /// The function this entry holds, if any.
    pub fn callable(&self) -> Option<Callable<'a>> {
        match self.value {
            EntryValue::Method(function) => Some(Callable::Function(function)),
            EntryValue::Expr(expr) => Callable::from_expr(expr),
            EntryValue::Shorthand(_) => None,
        }
    }

    /// The object literal this entry holds, or an error naming `option`.
    pub fn object(&self, option: &str) -> Result<&'a ObjectLit, TransformError> {
        match self.expr() {
            Some(Expr::Object(object)) => Ok(object),
            _ => Err(TransformError::shape(option, "an object literal")),
        }
    }
}

/// Iterates the entries of an object literal, skipping spreads and accessor
/// entries.
pub(crate) fn entries<'a>(object: &'a ObjectLit, option: &'static str) -> Vec<Entry<'a>> {
    object
        .props
        .iter()
        .filter_map(|prop| {
            let entry = match prop {
                PropOrSpread::Prop(prop) => Entry::from_prop(prop),
                _ => None,
            };
            if entry.is_none() {
                warn!(option, "skipping unsupported entry");
            }
            entry
        })
        .collect()
}

/// A function-valued entry.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Callable<'a> {
    Function(&'a Function),
    Arrow(&'a ArrowExpr),
}

impl<'a> Callable<'a> {
    pub fn from_expr(expr: &'a Expr) -> Option<Self> {
        match unwrap_paren(expr) {
            Expr::Fn(fn_expr) => Some(Self::Function(&fn_expr.function)),
            Expr::Arrow(arrow) => Some(Self::Arrow(arrow)),
            _ => None,
        }
    }

    /// Returns an owned ordinary function with the same signature and body.
    pub fn to_function(self) -> Function {
        match self {
            Self::Function(function) => function.clone(),
            Self::Arrow(arrow) => function_from_arrow(arrow),
        }
    }
}

/// Runs every recognized option of `object` through its handler, in
/// declaration order.
pub fn convert_options(object: &ObjectLit) -> Result<ClassBuilder, TransformError> {
    let mut builder = ClassBuilder::new();

    for prop in &object.props {
        let PropOrSpread::Prop(prop) = prop else {
            debug!("ignoring spread in options object");
            continue;
        };
        let Some(entry) = Entry::from_prop(prop) else {
            debug!("ignoring accessor in options object");
            continue;
        };
        let Some(name) = entry.name() else {
            continue;
        };
        let Some(option) = OptionKey::classify(name) else {
            debug!(option = name, "ignoring unrecognized option");
            continue;
        };

        match option {
            OptionKey::Props => props::convert(&mut builder, &entry)?,
            OptionKey::Name => convert_name(&mut builder, &entry)?,
            OptionKey::Methods => methods::convert(&mut builder, &entry)?,
            OptionKey::Computed => computed::convert(&mut builder, &entry)?,
            OptionKey::Watch => watch::convert(&mut builder, &entry)?,
            OptionKey::Mixins => registry::convert_mixins(&mut builder, &entry)?,
            OptionKey::Components => registry::convert_components(&mut builder, &entry)?,
            OptionKey::Data => data::convert(&mut builder, &entry)?,
            OptionKey::Lifecycle => methods::convert_hook(&mut builder, &entry),
        }
    }

    builder.resolve_watch_names();
    Ok(builder)
}

fn convert_name(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    let name = match entry.expr() {
        Some(Expr::Lit(Lit::Str(s))) => s.value.to_string_lossy().into_owned(),
        _ => return Err(TransformError::shape("name", "a string literal")),
    };
    builder.set_class_name(class_name_from(&name));
    Ok(())
}
