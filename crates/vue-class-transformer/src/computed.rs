//! `computed` option handling.

use swc_ecma_ast::{Expr, Function, MethodKind};
use tracing::warn;

use crate::ast::{body_only, class_method, param};
use crate::builder::{ClassBuilder, Member};
use crate::error::TransformError;
use crate::options::{entries, Callable, Entry};

/// The accepted forms of one computed property.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ComputedShape<'a> {
    /// `total() {}`, `total: function () {}` or `total: () => ...`
    Getter(Callable<'a>),
    /// `total: { get() {}, set(value) {} }`
    Accessors {
        get: Option<Callable<'a>>,
        set: Option<Callable<'a>>,
    },
}

impl<'a> ComputedShape<'a> {
    fn of(entry: &Entry<'a>) -> Option<Self> {
        if let Some(callable) = entry.callable() {
            return Some(Self::Getter(callable));
        }
        let Some(Expr::Object(object)) = entry.expr() else {
            return None;
        };

        let accessors = entries(object, "computed");
        let find = |name: &str| {
            accessors
                .iter()
                .find(|accessor| accessor.name() == Some(name))
                .and_then(Entry::callable)
        };
        let (get, set) = (find("get"), find("set"));
        (get.is_some() || set.is_some()).then_some(Self::Accessors { get, set })
    }
}

pub(crate) fn convert(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    let computed = entry.object("computed")?;

    for property in entries(computed, "computed") {
        let Some(shape) = ComputedShape::of(&property) else {
            warn!(computed = %property.display_name(), "skipping computed property without a getter or setter");
            continue;
        };

        match shape {
            ComputedShape::Getter(get) => push_getter(builder, &property, get),
            ComputedShape::Accessors { get, set } => {
                if let Some(get) = get {
                    push_getter(builder, &property, get);
                }
                if let Some(set) = set {
                    push_setter(builder, &property, set);
                }
            }
        }
    }
    Ok(())
}

/// `get <key>() { <body> }`
fn push_getter(builder: &mut ClassBuilder, property: &Entry<'_>, get: Callable<'_>) {
    let function = body_only(&get.to_function());
    builder.push_method(Member::Getter(class_method(
        property.key.clone(),
        function,
        MethodKind::Getter,
    )));
}

/// `set <key>(<first param or value>) { <body> }`
fn push_setter(builder: &mut ClassBuilder, property: &Entry<'_>, set: Callable<'_>) {
    let source = set.to_function();
    let value = source.params.first().cloned().unwrap_or_else(|| param("value"));
    let function = Function {
        params: vec![value],
        ..body_only(&source)
    };
    builder.push_method(Member::Setter(class_method(
        property.key.clone(),
        function,
        MethodKind::Setter,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{member_key, parse_expr};
    use crate::builder::MemberKind;
    use crate::options::EntryValue;
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::Pat;

    fn run(source: &str) -> Result<ClassBuilder, TransformError> {
        let value = parse_expr(source);
        let entry = Entry {
            key: member_key("computed"),
            value: EntryValue::Expr(&value),
        };
        let mut builder = ClassBuilder::new();
        convert(&mut builder, &entry)?;
        Ok(builder)
    }

    fn accessors(builder: &ClassBuilder) -> Vec<(MemberKind, String)> {
        builder
            .methods()
            .iter()
            .map(|member| (member.kind(), member.name()))
            .collect()
    }

    #[test]
    fn test_getter_forms() {
        let builder = run(
            "{ total() { return 1 }, double: function (vm) { return 2 }, half: () => 3, n: 4 }",
        )
        .unwrap();
        assert_eq!(
            accessors(&builder),
            vec![
                (MemberKind::Getter, "total".to_string()),
                (MemberKind::Getter, "double".to_string()),
                (MemberKind::Getter, "half".to_string()),
            ]
        );

        let Member::Getter(double) = &builder.methods()[1] else {
            panic!("expected a getter");
        };
        assert!(double.function.params.is_empty());
        assert_eq!(double.kind, MethodKind::Getter);
    }

    #[test]
    fn test_get_set_object() {
        let builder = run(
            "{ full: { get() { return this.a }, set(v) { this.a = v } }, readOnly: { get() { return 1 } }, writeOnly: { set() {} } }",
        )
        .unwrap();
        assert_eq!(
            accessors(&builder),
            vec![
                (MemberKind::Getter, "full".to_string()),
                (MemberKind::Setter, "full".to_string()),
                (MemberKind::Getter, "readOnly".to_string()),
                (MemberKind::Setter, "writeOnly".to_string()),
            ]
        );

        let param_name = |index: usize| {
            let Member::Setter(setter) = &builder.methods()[index] else {
                panic!("expected a setter");
            };
            match &setter.function.params[0].pat {
                Pat::Ident(binding) => binding.id.sym.to_string(),
                _ => panic!("expected an identifier parameter"),
            }
        };
        assert_eq!(param_name(1), "v");
        assert_eq!(param_name(3), "value");
    }

    #[test]
    fn test_object_without_accessors_is_skipped() {
        let builder = run("{ odd: { cache: false } }").unwrap();
        assert!(builder.methods().is_empty());
    }
}
