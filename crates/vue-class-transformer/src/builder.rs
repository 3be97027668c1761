//! Accumulation of class members and assembly of the class declaration.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    Class, ClassDecl, ClassMember, ClassMethod, ClassProp, Decl, ExportDefaultExpr, Expr,
    ImportDecl, ImportNamedSpecifier, ImportPhase, ImportSpecifier, KeyValueProp, ModuleDecl,
    ModuleItem, ObjectLit, Prop, PropName, PropOrSpread, Stmt,
};
use tracing::debug;

use crate::ast::{call, decorator, ident, ident_expr, ident_name, key_name, member_key};
use crate::types::{type_annotation, DeclaredType};

/// Module every decorator and base class is imported from.
pub const DECORATOR_MODULE: &str = "vue-property-decorator";

/// Class name used when neither the `name` option nor the filename gives one.
pub const FALLBACK_CLASS_NAME: &str = "AnonymousComponent";

/// A name imported from [`DECORATOR_MODULE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportName {
    Component,
    Vue,
    Prop,
    Watch,
    Mixins,
}

impl ImportName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Component => "Component",
            Self::Vue => "Vue",
            Self::Prop => "Prop",
            Self::Watch => "Watch",
            Self::Mixins => "Mixins",
        }
    }
}

/// The category a synthesized member was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Prop,
    Data,
    Method,
    Getter,
    Setter,
    Watch,
    Lifecycle,
}

/// A synthesized class member.
#[derive(Debug, Clone)]
pub enum Member {
    Prop(ClassProp),
    Data(ClassProp),
    Method(ClassMethod),
    Getter(ClassMethod),
    Setter(ClassMethod),
    Watch(ClassMethod),
    Lifecycle(ClassMethod),
}

impl Member {
    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Prop(_) => MemberKind::Prop,
            Self::Data(_) => MemberKind::Data,
            Self::Method(_) => MemberKind::Method,
            Self::Getter(_) => MemberKind::Getter,
            Self::Setter(_) => MemberKind::Setter,
            Self::Watch(_) => MemberKind::Watch,
            Self::Lifecycle(_) => MemberKind::Lifecycle,
        }
    }

    /// Returns the member's name as written in the class.
    pub fn name(&self) -> String {
        let key = match self {
            Self::Prop(prop) | Self::Data(prop) => &prop.key,
            Self::Method(method)
            | Self::Getter(method)
            | Self::Setter(method)
            | Self::Watch(method)
            | Self::Lifecycle(method) => &method.key,
        };
        key_name(key).unwrap_or("[computed]").to_string()
    }

    fn into_class_member(self) -> ClassMember {
        match self {
            Self::Prop(prop) | Self::Data(prop) => ClassMember::ClassProp(prop),
            Self::Method(method)
            | Self::Getter(method)
            | Self::Setter(method)
            | Self::Watch(method)
            | Self::Lifecycle(method) => ClassMember::Method(method),
        }
    }
}

/// A summary of one converted component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSummary {
    /// The class name.
    pub class_name: String,
    /// Names imported from the decorator module, in import order.
    pub imports: Vec<&'static str>,
    /// Mixin identifiers in `extends Mixins(...)` order.
    pub mixins: Vec<String>,
    /// Registered sub-component names.
    pub components: Vec<String>,
    /// Field names in class order, including the implicit `name` prop.
    pub fields: Vec<String>,
    /// Method and accessor names in class order.
    pub methods: Vec<String>,
}

/// Collects everything the option handlers produce for one component.
#[derive(Debug)]
pub struct ClassBuilder {
    class_name: String,
    fields: Vec<Member>,
    methods: Vec<Member>,
    imports: IndexSet<ImportName>,
    mixins: Vec<String>,
    components: IndexMap<String, PropOrSpread>,
}

impl Default for ClassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassBuilder {
    pub fn new() -> Self {
        let mut imports = IndexSet::new();
        imports.insert(ImportName::Component);
        imports.insert(ImportName::Vue);
        // The implicit `name` field is always a prop.
        imports.insert(ImportName::Prop);

        Self {
            class_name: String::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            imports,
            mixins: Vec::new(),
            components: IndexMap::new(),
        }
    }

    pub fn set_class_name(&mut self, name: String) {
        self.class_name = name;
    }

    /// The class name, empty until one is set.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn require(&mut self, name: ImportName) {
        self.imports.insert(name);
    }

    pub fn push_field(&mut self, member: Member) {
        self.fields.push(member);
    }

    pub fn push_method(&mut self, member: Member) {
        self.methods.push(member);
    }

    pub fn push_mixin(&mut self, name: String) {
        self.mixins.push(name);
        self.require(ImportName::Mixins);
    }

    /// Registers a sub-component. The first registration of a name wins.
    pub fn register_component(&mut self, name: String, value: Box<Expr>) {
        if self.components.contains_key(&name) {
            return;
        }
        let entry = match (&*value, member_key(&name)) {
            (Expr::Ident(local), PropName::Ident(_)) if local.sym.as_str() == name => {
                Prop::Shorthand(local.clone())
            }
            (_, key) => Prop::KeyValue(KeyValueProp { key, value }),
        };
        self.components
            .insert(name, PropOrSpread::Prop(Box::new(entry)));
    }

    pub fn fields(&self) -> &[Member] {
        &self.fields
    }

    pub fn methods(&self) -> &[Member] {
        &self.methods
    }

    /// Renames generated watch handlers whose name is already taken.
    ///
    /// Names of fields, methods, accessors and hooks come from the component
    /// and are kept; a clashing handler gets a `_<n>` counter before `Change`.
    pub fn resolve_watch_names(&mut self) {
        let mut taken: HashSet<String> = std::iter::once("name".to_string())
            .chain(
                self.fields
                    .iter()
                    .chain(&self.methods)
                    .filter(|member| member.kind() != MemberKind::Watch)
                    .map(Member::name),
            )
            .collect();

        for member in &mut self.methods {
            let Member::Watch(method) = member else {
                continue;
            };
            let Some(name) = key_name(&method.key).map(str::to_string) else {
                continue;
            };
            let unique = unique_name(&name, &taken);
            if unique != name {
                debug!(from = %name, to = %unique, "renamed clashing watch handler");
                method.key = PropName::Ident(ident_name(&unique));
            }
            taken.insert(unique);
        }
    }

    pub fn summary(&self) -> ComponentSummary {
        ComponentSummary {
            class_name: self.class_name.clone(),
            imports: self.imports.iter().map(|name| name.as_str()).collect(),
            mixins: self.mixins.clone(),
            components: self.components.keys().cloned().collect(),
            fields: std::iter::once("name".to_string())
                .chain(self.fields.iter().map(Member::name))
                .collect(),
            methods: self.methods.iter().map(Member::name).collect(),
        }
    }

    /// Assembles the import declaration, the decorated class declaration and
    /// the default export of the class, in that order.
    ///
    /// The decorator is printed before `class`, never after `export default`.
    pub fn finish(self) -> [ModuleItem; 3] {
        let class_ident = if self.class_name.is_empty() {
            ident(FALLBACK_CLASS_NAME)
        } else {
            ident(&self.class_name)
        };

        let import = ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
            span: DUMMY_SP,
            specifiers: self
                .imports
                .iter()
                .map(|name| {
                    ImportSpecifier::Named(ImportNamedSpecifier {
                        span: DUMMY_SP,
                        local: ident(name.as_str()),
                        imported: None,
                        is_type_only: false,
                    })
                })
                .collect(),
            src: Box::new(DECORATOR_MODULE.into()),
            type_only: false,
            with: None,
            phase: ImportPhase::Evaluation,
        }));

        let super_class = if self.mixins.is_empty() {
            ident_expr(ImportName::Vue.as_str())
        } else {
            call(
                ImportName::Mixins.as_str(),
                self.mixins.iter().map(|name| ident_expr(name)).collect(),
            )
        };

        let component_args = if self.components.is_empty() {
            Vec::new()
        } else {
            let components = ObjectLit {
                span: DUMMY_SP,
                props: self.components.into_values().collect(),
            };
            vec![Box::new(Expr::Object(ObjectLit {
                span: DUMMY_SP,
                props: vec![PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
                    key: PropName::Ident(ident_name("components")),
                    value: Box::new(Expr::Object(components)),
                })))],
            }))]
        };

        let body = std::iter::once(implicit_name_field())
            .chain(self.fields)
            .chain(self.methods)
            .map(Member::into_class_member)
            .collect();

        let class = Class {
            span: DUMMY_SP,
            decorators: vec![decorator(ImportName::Component.as_str(), component_args)],
            body,
            super_class: Some(super_class),
            ..Default::default()
        };

        let export = ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(ExportDefaultExpr {
            span: DUMMY_SP,
            expr: Box::new(Expr::Ident(class_ident.clone())),
        }));
        let class = ModuleItem::Stmt(Stmt::Decl(Decl::Class(ClassDecl {
            ident: class_ident,
            declare: false,
            class: Box::new(class),
        })));

        [import, class, export]
    }
}

/// Returns `name`, or the first `<stem>_<n>Change` variant not in `taken`.
fn unique_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }
    let stem = name.strip_suffix("Change").unwrap_or(name);
    let mut counter = 1;
    loop {
        let candidate = format!("{stem}_{counter}Change");
        if !taken.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// `@Prop() readonly name?: string;`
fn implicit_name_field() -> Member {
    Member::Prop(ClassProp {
        span: DUMMY_SP,
        key: PropName::Ident(ident_name("name")),
        type_ann: Some(type_annotation(&[DeclaredType::String])),
        decorators: vec![decorator(ImportName::Prop.as_str(), Vec::new())],
        is_optional: true,
        readonly: true,
        ..Default::default()
    })
}

/// Derives a class name from the `name` option.
///
/// Words separated by `-`, `.` or spaces are joined and capitalized
/// (`my-card` -> `MyCard`). Other characters that cannot appear in an
/// identifier are dropped, as are leading digits.
pub fn class_name_from(name: &str) -> String {
    let name = name.trim_start_matches(|c: char| !(c.is_alphabetic() || c == '_' || c == '$'));

    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            if capitalize_next {
                result.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(c);
            }
        } else if c == '-' || c == '.' || c == ' ' {
            capitalize_next = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_name_from() {
        assert_eq!(class_name_from("hello"), "Hello");
        assert_eq!(class_name_from("my-card"), "MyCard");
        assert_eq!(class_name_from("userProfile"), "UserProfile");
        assert_eq!(class_name_from("nav bar"), "NavBar");
        assert_eq!(class_name_from("2fa-form"), "FaForm");
        assert_eq!(class_name_from("%%"), "");
        assert_eq!(class_name_from(""), "");
    }

    #[test]
    fn test_default_imports() {
        let builder = ClassBuilder::new();
        assert_eq!(builder.summary().imports, vec!["Component", "Vue", "Prop"]);
    }

    #[test]
    fn test_mixins_require_import_once() {
        let mut builder = ClassBuilder::new();
        builder.push_mixin("A".to_string());
        builder.push_mixin("B".to_string());
        let summary = builder.summary();
        assert_eq!(summary.imports, vec!["Component", "Vue", "Prop", "Mixins"]);
        assert_eq!(summary.mixins, vec!["A", "B"]);
    }

    #[test]
    fn test_components_deduplicated() {
        let mut builder = ClassBuilder::new();
        builder.register_component("Foo".to_string(), ident_expr("Foo"));
        builder.register_component("Bar".to_string(), ident_expr("Bar"));
        builder.register_component("Foo".to_string(), ident_expr("Other"));
        assert_eq!(builder.summary().components, vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_finish_produces_import_class_and_export() {
        let mut builder = ClassBuilder::new();
        builder.set_class_name("Hello".to_string());
        let [import, class, export] = builder.finish();

        let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = import else {
            panic!("expected an import declaration");
        };
        assert_eq!(import.specifiers.len(), 3);
        assert_eq!(import.src.value.as_str(), Some(DECORATOR_MODULE));

        let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = class else {
            panic!("expected a class declaration");
        };
        assert_eq!(class.ident.sym.as_str(), "Hello");
        assert_eq!(class.class.decorators.len(), 1);
        assert_eq!(class.class.body.len(), 1);
        assert!(matches!(
            class.class.super_class.as_deref(),
            Some(Expr::Ident(base)) if base.sym.as_str() == "Vue"
        ));

        let ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) = export else {
            panic!("expected a default export");
        };
        assert!(matches!(&*export.expr, Expr::Ident(name) if name.sym.as_str() == "Hello"));
    }

    #[test]
    fn test_finish_without_name_uses_fallback() {
        let [_, class, _] = ClassBuilder::new().finish();
        let ModuleItem::Stmt(Stmt::Decl(Decl::Class(class))) = class else {
            panic!("expected a class declaration");
        };
        assert_eq!(class.ident.sym.as_str(), FALLBACK_CLASS_NAME);
    }

    fn method(name: &str) -> ClassMethod {
        crate::ast::class_method(
            PropName::Ident(ident_name(name)),
            swc_ecma_ast::Function::default(),
            swc_ecma_ast::MethodKind::Method,
        )
    }

    #[test]
    fn test_resolve_watch_names() {
        let mut builder = ClassBuilder::new();
        builder.push_method(Member::Watch(method("onF0Change")));
        builder.push_method(Member::Watch(method("onF0Change")));
        builder.push_method(Member::Watch(method("onF0Change")));
        builder.push_method(Member::Watch(method("onSaveChange")));
        // A user method declared after the watcher keeps its name.
        builder.push_method(Member::Method(method("onSaveChange")));
        builder.resolve_watch_names();

        assert_eq!(
            builder.summary().methods,
            vec![
                "onF0Change",
                "onF0_1Change",
                "onF0_2Change",
                "onSave_1Change",
                "onSaveChange",
            ]
        );
    }
}
