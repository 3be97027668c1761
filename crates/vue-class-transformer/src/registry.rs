//! `mixins` and `components` option handling.

use swc_ecma_ast::Expr;
use tracing::{debug, warn};

use crate::ast::unwrap_paren;
use crate::builder::ClassBuilder;
use crate::error::TransformError;
use crate::options::{entries, Entry, EntryValue};

/// Collects identifier mixins in declaration order. Other elements are
/// skipped.
pub(crate) fn convert_mixins(
    builder: &mut ClassBuilder,
    entry: &Entry<'_>,
) -> Result<(), TransformError> {
    let Some(Expr::Array(array)) = entry.expr() else {
        return Err(TransformError::shape("mixins", "an array"));
    };

    for element in array.elems.iter().flatten() {
        match unwrap_paren(&element.expr) {
            Expr::Ident(ident) if element.spread.is_none() => {
                builder.push_mixin(ident.sym.to_string());
            }
            _ => debug!("skipping mixin that is not an identifier"),
        }
    }
    Ok(())
}

/// Registers every entry of `components` with the class decorator.
pub(crate) fn convert_components(
    builder: &mut ClassBuilder,
    entry: &Entry<'_>,
) -> Result<(), TransformError> {
    let components = entry.object("components")?;

    for component in entries(components, "components") {
        let Some(name) = component.name() else {
            warn!("skipping component registered under a computed key");
            continue;
        };
        let value = match component.value {
            EntryValue::Expr(expr) => Box::new(expr.clone()),
            EntryValue::Shorthand(ident) => Box::new(Expr::Ident(ident.clone())),
            EntryValue::Method(_) => {
                warn!(component = name, "skipping component declared as a method");
                continue;
            }
        };
        builder.register_component(name.to_string(), value);
    }
    Ok(())
}
