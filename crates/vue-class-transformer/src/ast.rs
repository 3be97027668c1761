//! Helpers for reading and building swc AST nodes.

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, ClassMethod, ComputedPropName,
    Decorator, Expr, ExprOrSpread, ExprStmt, Function, Ident, IdentName, MemberExpr, MemberProp,
    MethodKind, Param, Pat, PropName, ReturnStmt, Stmt, ThisExpr,
};

pub(crate) fn ident(name: &str) -> Ident {
    Ident::new_no_ctxt(name.into(), DUMMY_SP)
}

pub(crate) fn ident_name(name: &str) -> IdentName {
    IdentName::new(name.into(), DUMMY_SP)
}

/// Returns the static name of an object key, if it has one.
pub(crate) fn key_name(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.as_str()),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

/// Builds a member key, quoting names that are not valid identifiers.
pub(crate) fn member_key(name: &str) -> PropName {
    if is_valid_identifier(name) {
        PropName::Ident(ident_name(name))
    } else {
        PropName::Str(name.into())
    }
}

pub(crate) fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn unwrap_paren(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}

pub(crate) fn str_expr(value: &str) -> Box<Expr> {
    Box::new(Expr::from(value))
}

pub(crate) fn ident_expr(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(ident(name)))
}

pub(crate) fn call(callee: &str, args: Vec<Box<Expr>>) -> Box<Expr> {
    Box::new(Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(ident_expr(callee)),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect(),
        ..Default::default()
    }))
}

/// Builds `@callee(args...)`.
pub(crate) fn decorator(callee: &str, args: Vec<Box<Expr>>) -> Decorator {
    Decorator {
        span: DUMMY_SP,
        expr: call(callee, args),
    }
}

pub(crate) fn param(name: &str) -> Param {
    Param {
        span: DUMMY_SP,
        decorators: Vec::new(),
        pat: Pat::from(ident(name)),
    }
}

/// Builds `this.<target>(args...);`, using a computed member for targets that
/// are not identifiers.
pub(crate) fn this_call(target: &str, args: &[&str]) -> Stmt {
    let prop = if is_valid_identifier(target) {
        MemberProp::Ident(ident_name(target))
    } else {
        MemberProp::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: str_expr(target),
        })
    };
    let callee = Box::new(Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(Expr::This(ThisExpr { span: DUMMY_SP })),
        prop,
    }));

    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(Expr::Call(CallExpr {
            span: DUMMY_SP,
            callee: Callee::Expr(callee),
            args: args
                .iter()
                .map(|arg| ExprOrSpread {
                    spread: None,
                    expr: ident_expr(arg),
                })
                .collect(),
            ..Default::default()
        })),
    })
}

/// Converts an arrow function into an ordinary function, wrapping an
/// expression body in a `return`.
pub(crate) fn function_from_arrow(arrow: &ArrowExpr) -> Function {
    let body = match &*arrow.body {
        BlockStmtOrExpr::BlockStmt(block) => block.clone(),
        BlockStmtOrExpr::Expr(expr) => BlockStmt {
            span: DUMMY_SP,
            stmts: vec![Stmt::Return(ReturnStmt {
                span: DUMMY_SP,
                arg: Some(expr.clone()),
            })],
            ..Default::default()
        },
        #[allow(unreachable_patterns)]
        _ => BlockStmt::default(),
    };

    Function {
        params: arrow
            .params
            .iter()
            .map(|pat| Param {
                span: DUMMY_SP,
                decorators: Vec::new(),
                pat: pat.clone(),
            })
            .collect(),
        body: Some(body),
        is_async: arrow.is_async,
        is_generator: arrow.is_generator,
        type_params: arrow.type_params.clone(),
        return_type: arrow.return_type.clone(),
        ..Default::default()
    }
}

/// Returns a function with the same body and no parameters, flags or types.
pub(crate) fn body_only(function: &Function) -> Function {
    Function {
        body: Some(function.body.clone().unwrap_or_default()),
        ..Default::default()
    }
}

pub(crate) fn class_method(key: PropName, function: Function, kind: MethodKind) -> ClassMethod {
    ClassMethod {
        span: DUMMY_SP,
        key,
        function: Box::new(function),
        kind,
        ..Default::default()
    }
}

#[cfg(test)]
pub(crate) fn parse_expr(source: &str) -> Box<Expr> {
    use swc_common::{sync::Lrc, FileName, SourceMap};
    use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(Lrc::new(FileName::Anon), format!("({source})"));
    let mut parser = Parser::new(
        Syntax::Typescript(TsSyntax::default()),
        StringInput::from(&*fm),
        None,
    );
    parser.parse_expr().expect("test expression parses")
}
