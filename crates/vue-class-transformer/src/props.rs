//! `props` option handling.
//!
//! Every declared prop becomes a readonly field decorated with `@Prop(...)`:
//!
//! | Declaration                      | Decorator                     | Field type         |
//! |----------------------------------|-------------------------------|--------------------|
//! | `props: ['a']`                   | `@Prop()`                     | `any \| undefined` |
//! | `a: Number`                      | `@Prop({ type: Number })`     | `number`           |
//! | `a: [Number, String]`            | `@Prop([Number, String])`     | `number \| string` |
//! | `a: 'x'`                         | `@Prop({ default: 'x' })`     | `string`           |
//! | `a: { type: Number, default: 0 }`| `@Prop({ type: ..., ... })`   | `number`           |

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    ArrayLit, ClassProp, Expr, Ident, KeyValueProp, Lit, ObjectLit, Prop, PropName,
    PropOrSpread,
};
use tracing::warn;

use crate::ast::{decorator, ident_name, key_name, member_key, unwrap_paren};
use crate::builder::{ClassBuilder, ImportName, Member};
use crate::error::TransformError;
use crate::options::{entries, Entry};
use crate::types::{type_annotation, DeclaredType};

/// The accepted forms of one entry of an object-valued `props`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PropShape<'a> {
    /// `count: Number`
    Constructor(&'a Ident),
    /// `value: [Number, String]`
    Constructors(&'a ArrayLit),
    /// `label: 'hello'`
    Default(&'a Expr),
    /// `size: { type: Number, default: 0 }`
    Descriptor(&'a ObjectLit),
}

impl<'a> PropShape<'a> {
    fn of(expr: &'a Expr) -> Option<Self> {
        match expr {
            Expr::Ident(ident) => Some(Self::Constructor(ident)),
            Expr::Array(array) => Some(Self::Constructors(array)),
            Expr::Lit(Lit::Str(_)) => Some(Self::Default(expr)),
            Expr::Object(object) => Some(Self::Descriptor(object)),
            _ => None,
        }
    }
}

pub(crate) fn convert(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    match entry.expr() {
        Some(Expr::Array(array)) => {
            for element in &array.elems {
                let name = match element.as_ref().map(|e| unwrap_paren(&e.expr)) {
                    Some(Expr::Lit(Lit::Str(s))) => s.value.to_string_lossy().into_owned(),
                    _ => return Err(TransformError::InvalidPropName),
                };
                builder.push_field(named_prop(&name));
            }
        }
        Some(Expr::Object(object)) => {
            for prop in entries(object, "props") {
                let Some(expr) = prop.expr() else {
                    warn!(prop = %prop.display_name(), "skipping prop that is not a declaration");
                    continue;
                };
                let Some(shape) = PropShape::of(expr) else {
                    warn!(prop = %prop.display_name(), "skipping prop with unsupported declaration");
                    continue;
                };
                builder.push_field(declared_prop(prop.key.clone(), shape)?);
            }
        }
        _ => {
            return Err(TransformError::shape(
                "props",
                "an array of names or an object literal",
            ))
        }
    }

    builder.require(ImportName::Prop);
    Ok(())
}

/// `@Prop() readonly <name>!: any | undefined;`
fn named_prop(name: &str) -> Member {
    prop_field(
        member_key(name),
        Vec::new(),
        &[DeclaredType::Any, DeclaredType::Undefined],
    )
}

fn declared_prop(key: PropName, shape: PropShape<'_>) -> Result<Member, TransformError> {
    let prop_name = key_name(&key).unwrap_or("[computed]").to_string();

    let (arg, types) = match shape {
        PropShape::Constructor(ident) => (
            options_object("type", Box::new(Expr::Ident(ident.clone()))),
            vec![DeclaredType::of_constructor(ident.sym.as_str())],
        ),
        PropShape::Constructors(array) => (
            Box::new(Expr::Array(array.clone())),
            constructor_list(array, &prop_name)?,
        ),
        PropShape::Default(literal) => (
            options_object("default", Box::new(literal.clone())),
            vec![DeclaredType::String],
        ),
        PropShape::Descriptor(object) => (
            Box::new(Expr::Object(object.clone())),
            descriptor_types(object, &prop_name)?,
        ),
    };

    Ok(prop_field(key, vec![arg], &types))
}

/// Reads the field type of a descriptor from its `type` key, falling back to
/// a literal `default`.
fn descriptor_types(object: &ObjectLit, prop: &str) -> Result<Vec<DeclaredType>, TransformError> {
    let descriptor = entries(object, "props");
    let lookup = |name: &str| {
        descriptor
            .iter()
            .find(|entry| entry.name() == Some(name))
            .and_then(Entry::expr)
    };

    if let Some(ty) = lookup("type") {
        return match ty {
            Expr::Ident(ident) => Ok(vec![DeclaredType::of_constructor(ident.sym.as_str())]),
            Expr::Array(array) => constructor_list(array, prop),
            _ => Err(TransformError::InvalidPropType {
                prop: prop.to_string(),
            }),
        };
    }

    // Function defaults are factories, not values of type `Function`.
    let ty = match lookup("default") {
        Some(Expr::Fn(_) | Expr::Arrow(_)) | None => DeclaredType::Any,
        Some(default) => DeclaredType::of_literal(default),
    };
    Ok(vec![ty])
}

fn constructor_list(array: &ArrayLit, prop: &str) -> Result<Vec<DeclaredType>, TransformError> {
    array
        .elems
        .iter()
        .map(|element| match element.as_ref().map(|e| unwrap_paren(&e.expr)) {
            Some(Expr::Ident(ident)) => Ok(DeclaredType::of_constructor(ident.sym.as_str())),
            _ => Err(TransformError::InvalidPropType {
                prop: prop.to_string(),
            }),
        })
        .collect()
}

/// `{ <key>: <value> }`
fn options_object(key: &str, value: Box<Expr>) -> Box<Expr> {
    Box::new(Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
            key: PropName::Ident(ident_name(key)),
            value,
        })))],
    }))
}

fn prop_field(key: PropName, args: Vec<Box<Expr>>, types: &[DeclaredType]) -> Member {
    Member::Prop(ClassProp {
        span: DUMMY_SP,
        key,
        type_ann: Some(type_annotation(types)),
        decorators: vec![decorator(ImportName::Prop.as_str(), args)],
        readonly: true,
        definite: true,
        ..Default::default()
    })
}
