//! `watch` option handling.
//!
//! Each watcher becomes a method named `on<Watched>Change` and decorated with
//! `@Watch('<watched>')`. Array-valued watchers produce one method per
//! element, with the element index inserted before `Change`. Names that still
//! clash across the class are resolved by
//! [`ClassBuilder::resolve_watch_names`](crate::ClassBuilder::resolve_watch_names).

use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    ArrayLit, BlockStmt, Expr, Function, KeyValueProp, Lit, MethodKind, ObjectLit, Prop, PropName,
    PropOrSpread,
};
use tracing::warn;

use crate::ast::{
    class_method, decorator, ident_name, member_key, param, str_expr, this_call, unwrap_paren,
};
use crate::builder::{ClassBuilder, ImportName, Member};
use crate::error::TransformError;
use crate::options::{entries, Callable, Entry, EntryValue};

const FORWARDED_ARGS: [&str; 2] = ["newVal", "oldVal"];

/// The accepted forms of one watcher.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WatchShape<'a> {
    /// `count(newVal, oldVal) {}`, `count: function () {}` or an arrow
    Handler(Callable<'a>),
    /// `count: 'onCount'`
    Delegate(&'a str),
    /// `count: ['first', function second() {}, { handler() {} }]`
    Targets(&'a ArrayLit),
    /// `count: { handler() {}, deep: true }`
    Descriptor(&'a ObjectLit),
}

impl<'a> WatchShape<'a> {
    fn of(entry: &Entry<'a>) -> Option<Self> {
        if let EntryValue::Method(function) = entry.value {
            return Some(Self::Handler(Callable::Function(function)));
        }
        match entry.expr()? {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(Self::Delegate),
            Expr::Array(array) => Some(Self::Targets(array)),
            Expr::Object(object) => Some(Self::Descriptor(object)),
            expr => Callable::from_expr(expr).map(Self::Handler),
        }
    }
}

/// One element of an array-valued watcher.
#[derive(Debug, Clone, Copy)]
pub(crate) enum WatchTarget<'a> {
    /// `'method'`
    Delegate(&'a str),
    /// `function name(newVal) {}`; `name` is `None` for anonymous functions.
    Handler {
        name: Option<&'a str>,
        callable: Callable<'a>,
    },
    /// `{ handler() {}, immediate: true }`
    Descriptor(&'a ObjectLit),
}

impl<'a> WatchTarget<'a> {
    fn of(expr: &'a Expr) -> Option<Self> {
        match unwrap_paren(expr) {
            Expr::Lit(Lit::Str(s)) => s.value.as_str().map(Self::Delegate),
            Expr::Fn(fn_expr) => Some(Self::Handler {
                name: fn_expr.ident.as_ref().map(|ident| ident.sym.as_str()),
                callable: Callable::Function(&fn_expr.function),
            }),
            Expr::Arrow(arrow) => Some(Self::Handler {
                name: None,
                callable: Callable::Arrow(arrow),
            }),
            Expr::Object(object) => Some(Self::Descriptor(object)),
            _ => None,
        }
    }
}

pub(crate) fn convert(builder: &mut ClassBuilder, entry: &Entry<'_>) -> Result<(), TransformError> {
    let watchers = entry.object("watch")?;

    let mut produced = false;
    for watcher in entries(watchers, "watch") {
        let Some(watched) = watcher.name() else {
            warn!("skipping watcher with a computed key");
            continue;
        };
        let Some(shape) = WatchShape::of(&watcher) else {
            warn!(watched, "skipping watcher with unsupported handler");
            continue;
        };

        let members = match shape {
            WatchShape::Handler(callable) => {
                vec![handler_method(watched, watched, None, callable.to_function(), None)]
            }
            WatchShape::Delegate(target) => {
                vec![handler_method(watched, watched, None, forwarding(target), None)]
            }
            WatchShape::Descriptor(object) => descriptor_method(watched, None, object)
                .into_iter()
                .collect(),
            WatchShape::Targets(array) => target_methods(watched, array),
        };

        produced |= !members.is_empty();
        for member in members {
            builder.push_method(member);
        }
    }

    if produced {
        builder.require(ImportName::Watch);
    }
    Ok(())
}

fn target_methods(watched: &str, array: &ArrayLit) -> Vec<Member> {
    let mut members = Vec::new();
    for (index, element) in array.elems.iter().enumerate() {
        let Some(target) = element.as_ref().and_then(|e| WatchTarget::of(&e.expr)) else {
            warn!(watched, index, "skipping unsupported watch target");
            continue;
        };
        let member = match target {
            WatchTarget::Delegate(method) => Some(handler_method(
                method,
                watched,
                Some(index),
                forwarding(method),
                None,
            )),
            WatchTarget::Handler { name, callable } => Some(handler_method(
                name.unwrap_or(watched),
                watched,
                Some(index),
                callable.to_function(),
                None,
            )),
            WatchTarget::Descriptor(object) => descriptor_method(watched, Some(index), object),
        };
        members.extend(member);
    }
    members
}

/// Builds the method for `{ handler, deep, immediate }`, passing the flags
/// that are present on to `@Watch`.
fn descriptor_method(watched: &str, index: Option<usize>, descriptor: &ObjectLit) -> Option<Member> {
    let fields = entries(descriptor, "watch");
    let find = |name: &str| fields.iter().find(|field| field.name() == Some(name));

    let function = match find("handler") {
        Some(handler) => match (handler.callable(), handler.expr()) {
            (Some(callable), _) => callable.to_function(),
            (None, Some(Expr::Lit(Lit::Str(s)))) => forwarding(&s.value.to_string_lossy()),
            _ => {
                warn!(watched, "skipping watcher with unsupported handler");
                return None;
            }
        },
        None => {
            warn!(watched, "skipping watch descriptor without a handler");
            return None;
        }
    };

    let flags: Vec<PropOrSpread> = ["deep", "immediate"]
        .into_iter()
        .filter_map(|flag| {
            let value = find(flag)?.expr()?;
            Some(PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                key: PropName::Ident(ident_name(flag)),
                value: Box::new(value.clone()),
            }))))
        })
        .collect();
    let options = (!flags.is_empty()).then(|| {
        Box::new(Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props: flags,
        }))
    });

    Some(handler_method(watched, watched, index, function, options))
}

/// `newVal, oldVal => this.<target>(newVal, oldVal)`
fn forwarding(target: &str) -> Function {
    Function {
        params: FORWARDED_ARGS.iter().map(|name| param(name)).collect(),
        body: Some(BlockStmt {
            span: DUMMY_SP,
            stmts: vec![this_call(target, &FORWARDED_ARGS)],
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn handler_method(
    source: &str,
    watched: &str,
    index: Option<usize>,
    function: Function,
    options: Option<Box<Expr>>,
) -> Member {
    let args = std::iter::once(str_expr(watched)).chain(options).collect();
    let function = Function {
        decorators: vec![decorator(ImportName::Watch.as_str(), args)],
        ..function
    };
    Member::Watch(class_method(
        member_key(&handler_name(source, index)),
        function,
        MethodKind::Method,
    ))
}

/// Derives `on<Source>Change`, or `on<Source><index>Change` for array
/// elements.
///
/// Characters outside `[A-Za-z0-9_]` are dropped and the first remaining
/// character is upper-cased: `user.name` becomes `onUsernameChange`.
pub fn handler_name(source: &str, index: Option<usize>) -> String {
    let mut word = source
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_');
    let capitalized: String = match word.next() {
        Some(first) => first.to_uppercase().chain(word).collect(),
        None => String::new(),
    };
    match index {
        Some(index) => format!("on{capitalized}{index}Change"),
        None => format!("on{capitalized}Change"),
    }
}
