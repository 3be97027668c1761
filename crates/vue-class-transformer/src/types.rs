//! Type inference tables for synthesized fields.
//!
//! Two lookups feed the type annotations of generated fields:
//! - constructor name -> type, for `props` declarations (`Number`, `[String, Array]`)
//! - literal kind -> type, for `data` initializers (`0`, `"x"`, `[]`)
//!
//! Both are total: anything unrecognized maps to `any`.

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    Expr, Lit, TsEntityName, TsKeywordType, TsKeywordTypeKind, TsType, TsTypeAnn,
    TsTypeParamInstantiation, TsTypeRef, TsUnionOrIntersectionType, TsUnionType, UnaryOp,
};

use crate::ast::ident;

/// A TypeScript type the converter can annotate a field with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    String,
    Number,
    Boolean,
    /// `Array<any>`
    Array,
    Function,
    Symbol,
    Undefined,
    Any,
}

impl DeclaredType {
    /// Looks up the type declared by a Vue prop constructor such as `Number`.
    pub fn of_constructor(name: &str) -> Self {
        match name {
            "String" => Self::String,
            "Number" => Self::Number,
            "Boolean" => Self::Boolean,
            "Array" => Self::Array,
            "Object" | "Date" => Self::Any,
            "Function" => Self::Function,
            "Symbol" => Self::Symbol,
            "Undefined" => Self::Undefined,
            _ => Self::Any,
        }
    }

    /// Infers the type of an initializer from its syntactic kind.
    pub fn of_literal(expr: &Expr) -> Self {
        match expr {
            Expr::Lit(Lit::Str(_)) | Expr::Tpl(_) => Self::String,
            Expr::Lit(Lit::Num(_)) => Self::Number,
            Expr::Lit(Lit::Bool(_)) => Self::Boolean,
            Expr::Array(_) => Self::Array,
            Expr::Fn(_) | Expr::Arrow(_) => Self::Function,
            Expr::Unary(unary)
                if unary.op == UnaryOp::Minus && matches!(*unary.arg, Expr::Lit(Lit::Num(_))) =>
            {
                Self::Number
            }
            Expr::Paren(paren) => Self::of_literal(&paren.expr),
            _ => Self::Any,
        }
    }

    /// Returns the type as TypeScript source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "Array<any>",
            Self::Function => "Function",
            Self::Symbol => "symbol",
            Self::Undefined => "undefined",
            Self::Any => "any",
        }
    }

    /// Builds the type node.
    pub fn to_ts_type(self) -> Box<TsType> {
        match self {
            Self::String => keyword(TsKeywordTypeKind::TsStringKeyword),
            Self::Number => keyword(TsKeywordTypeKind::TsNumberKeyword),
            Self::Boolean => keyword(TsKeywordTypeKind::TsBooleanKeyword),
            Self::Symbol => keyword(TsKeywordTypeKind::TsSymbolKeyword),
            Self::Undefined => keyword(TsKeywordTypeKind::TsUndefinedKeyword),
            Self::Any => keyword(TsKeywordTypeKind::TsAnyKeyword),
            Self::Array => type_ref(
                "Array",
                Some(vec![keyword(TsKeywordTypeKind::TsAnyKeyword)]),
            ),
            Self::Function => type_ref("Function", None),
        }
    }
}

/// Builds a type annotation from one or more types.
///
/// A single type is emitted as is; several become a union in the given order.
pub fn type_annotation(types: &[DeclaredType]) -> Box<TsTypeAnn> {
    let type_ann = match types {
        [] => DeclaredType::Any.to_ts_type(),
        [single] => single.to_ts_type(),
        many => Box::new(TsType::TsUnionOrIntersectionType(
            TsUnionOrIntersectionType::TsUnionType(TsUnionType {
                span: DUMMY_SP,
                types: many.iter().map(|ty| ty.to_ts_type()).collect(),
            }),
        )),
    };

    Box::new(TsTypeAnn {
        span: DUMMY_SP,
        type_ann,
    })
}

fn keyword(kind: TsKeywordTypeKind) -> Box<TsType> {
    Box::new(TsType::TsKeywordType(TsKeywordType {
        span: DUMMY_SP,
        kind,
    }))
}

fn type_ref(name: &str, params: Option<Vec<Box<TsType>>>) -> Box<TsType> {
    Box::new(TsType::TsTypeRef(TsTypeRef {
        span: DUMMY_SP,
        type_name: TsEntityName::Ident(ident(name)),
        type_params: params.map(|params| {
            Box::new(TsTypeParamInstantiation {
                span: DUMMY_SP,
                params,
            })
        }),
    }))
}
