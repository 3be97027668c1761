//! `data` option handling.

use swc_common::DUMMY_SP;
use swc_ecma_ast::{Accessibility, ClassProp, Expr, FnExpr, Function, ObjectLit, Stmt};
use tracing::warn;

use crate::ast::unwrap_paren;
use crate::builder::{ClassBuilder, Member};
use crate::error::TransformError;
use crate::options::{entries, Callable, Entry, EntryValue};
use crate::types::{type_annotation, DeclaredType};

/// Where the initial state object comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum DataSource<'a> {
    /// `data() { return { ... } }`, `data: function () {...}` or an arrow.
    Function(Callable<'a>),
    /// `data: { ... }`
    Object(&'a ObjectLit),
}

impl<'a> DataSource<'a> {
    fn of(entry: &Entry<'a>) -> Option<Self> {
        if let Some(callable) = entry.callable() {
            return Some(Self::Function(callable));
        }
        match entry.expr() {
            Some(Expr::Object(object)) => Some(Self::Object(object)),
            _ => None,
        }
    }
}

pub(crate) fn convert(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    let source = DataSource::of(entry)
        .ok_or_else(|| TransformError::shape("data", "a function or an object literal"))?;

    match source {
        DataSource::Object(object) => push_fields(builder, object),
        DataSource::Function(callable) => {
            let function = callable.to_function();
            let state = returned_object(&function)?;
            push_fields(builder, state);
        }
    }
    Ok(())
}

/// Finds the object literal returned by the first top-level `return`.
fn returned_object(function: &Function) -> Result<&ObjectLit, TransformError> {
    let arg = function
        .body
        .iter()
        .flat_map(|body| &body.stmts)
        .find_map(|stmt| match stmt {
            Stmt::Return(ret) => Some(ret.arg.as_deref()),
            _ => None,
        })
        .ok_or(TransformError::MissingDataReturn)?;

    match arg.map(unwrap_paren) {
        Some(Expr::Object(object)) => Ok(object),
        _ => Err(TransformError::DataNotObject),
    }
}

fn push_fields(builder: &mut ClassBuilder, state: &ObjectLit) {
    for entry in entries(state, "data") {
        if entry.name().is_none() {
            warn!("skipping data entry with a computed key");
            continue;
        }
        let value = match entry.value {
            EntryValue::Expr(expr) => Box::new(expr.clone()),
            EntryValue::Shorthand(ident) => Box::new(Expr::Ident(ident.clone())),
            EntryValue::Method(function) => Box::new(Expr::Fn(FnExpr {
                ident: None,
                function: Box::new(function.clone()),
            })),
        };
        let ty = match entry.value {
            EntryValue::Shorthand(_) => DeclaredType::Any,
            _ => DeclaredType::of_literal(&value),
        };

        builder.push_field(Member::Data(ClassProp {
            span: DUMMY_SP,
            key: entry.key.clone(),
            value: Some(value),
            type_ann: Some(type_annotation(&[ty])),
            accessibility: Some(Accessibility::Public),
            ..Default::default()
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{member_key, parse_expr};
    use crate::builder::MemberKind;
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::{Lit, TsKeywordTypeKind, TsType};

    fn run(source: &str) -> Result<ClassBuilder, TransformError> {
        let value = parse_expr(source);
        let entry = Entry {
            key: member_key("data"),
            value: EntryValue::Expr(&value),
        };
        let mut builder = ClassBuilder::new();
        convert(&mut builder, &entry)?;
        Ok(builder)
    }

    fn names(builder: &ClassBuilder) -> Vec<String> {
        builder.fields().iter().map(Member::name).collect()
    }

    fn keyword(member: &Member) -> Option<TsKeywordTypeKind> {
        let Member::Data(prop) = member else {
            panic!("expected a data field");
        };
        match &*prop.type_ann.as_ref()?.type_ann {
            TsType::TsKeywordType(keyword) => Some(keyword.kind),
            _ => None,
        }
    }

    #[test]
    fn test_function_form() {
        let builder = run("function () { const x = 1; return { count: 0, label: 'x' } }").unwrap();
        assert_eq!(names(&builder), vec!["count", "label"]);
        assert_eq!(keyword(&builder.fields()[0]), Some(TsKeywordTypeKind::TsNumberKeyword));
        assert_eq!(keyword(&builder.fields()[1]), Some(TsKeywordTypeKind::TsStringKeyword));

        let Member::Data(prop) = &builder.fields()[0] else {
            unreachable!()
        };
        assert_eq!(prop.accessibility, Some(Accessibility::Public));
        assert!(matches!(prop.value.as_deref(), Some(Expr::Lit(Lit::Num(_)))));
        assert!(builder.fields().iter().all(|m| m.kind() == MemberKind::Data));
    }

    #[test]
    fn test_arrow_and_object_forms() {
        assert_eq!(names(&run("() => ({ a: [], b: null })").unwrap()), vec!["a", "b"]);
        assert_eq!(names(&run("() => { return { a: 1 } }").unwrap()), vec!["a"]);
        assert_eq!(names(&run("{ open: false }").unwrap()), vec!["open"]);
    }

    #[test]
    fn test_unrecognized_literal_is_any() {
        let builder = run("() => ({ list: null, now: new Date() })").unwrap();
        for field in builder.fields() {
            assert_eq!(keyword(field), Some(TsKeywordTypeKind::TsAnyKeyword));
        }
    }

    #[test]
    fn test_shorthand_and_method_entries() {
        let builder = run("() => ({ items, format(v) { return v } })").unwrap();
        assert_eq!(names(&builder), vec!["items", "format"]);
        assert_eq!(keyword(&builder.fields()[0]), Some(TsKeywordTypeKind::TsAnyKeyword));
        assert_eq!(keyword(&builder.fields()[1]), None);
    }

    #[test]
    fn test_missing_return() {
        assert_eq!(
            run("function () { const a = 1 }").unwrap_err(),
            TransformError::MissingDataReturn
        );
    }

    #[test]
    fn test_non_object_return() {
        assert_eq!(
            run("function () { return state }").unwrap_err(),
            TransformError::DataNotObject
        );
        assert_eq!(run("function () { return }").unwrap_err(), TransformError::DataNotObject);
    }

    #[test]
    fn test_invalid_source() {
        assert!(matches!(
            run("'state'").unwrap_err(),
            TransformError::UnexpectedShape { .. }
        ));
    }
}
