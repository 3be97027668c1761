//! `methods` and lifecycle hook handling.
//!
//! Both copy the source function onto the class unchanged: same name, same
//! parameters, same body, same `async`/generator flags.

use swc_ecma_ast::MethodKind;
use tracing::warn;

use crate::ast::class_method;
use crate::builder::{ClassBuilder, Member};
use crate::error::TransformError;
use crate::options::{entries, Entry};

pub(crate) fn convert(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    let methods = entry.object("methods")?;

    for method in entries(methods, "methods") {
        let Some(callable) = method.callable() else {
            warn!(method = %method.display_name(), "skipping method that is not a function");
            continue;
        };
        builder.push_method(Member::Method(class_method(
            method.key.clone(),
            callable.to_function(),
            MethodKind::Method,
        )));
    }
    Ok(())
}

/// Copies a lifecycle hook such as `mounted() {}` onto the class.
pub(crate) fn convert_hook(builder: &mut ClassBuilder, entry: &Entry<'_>) {
    let Some(callable) = entry.callable() else {
        warn!(hook = %entry.display_name(), "skipping lifecycle hook that is not a function");
        return;
    };
    builder.push_method(Member::Lifecycle(class_method(
        entry.key.clone(),
        callable.to_function(),
        MethodKind::Method,
    )));
}
