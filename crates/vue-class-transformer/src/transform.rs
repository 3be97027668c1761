//! Parsing, conversion and emission of a component script.

use std::path::Path;

use swc_common::{sync::Lrc, FileName, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Expr, Module, ModuleDecl, ModuleItem};
use swc_ecma_codegen::{text_writer::JsWriter, Config, Emitter};
use swc_ecma_parser::{error::Error as ParseError, Parser, StringInput, Syntax, TsSyntax};
use tracing::{debug, warn};

use crate::ast::unwrap_paren;
use crate::builder::{class_name_from, ComponentSummary, FALLBACK_CLASS_NAME};
use crate::error::TransformError;
use crate::options::convert_options;

/// Options for transformation.
#[derive(Debug, Clone, Default)]
pub struct TransformOptions {
    /// The filename of the component, used in diagnostics and to name a
    /// component without a `name` option.
    pub filename: Option<String>,
    /// Whether the script contains JSX.
    pub jsx: bool,
}

/// The result of transformation.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The converted script.
    pub code: String,
    /// What was converted, or `None` if the script has no options object to
    /// convert.
    pub component: Option<ComponentSummary>,
}

/// A parsed script together with the source map its spans refer to.
pub struct Script {
    cm: Lrc<SourceMap>,
    /// The parsed module.
    pub module: Module,
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Parses a script as a TypeScript module with decorators enabled.
pub fn parse_script(source: &str, options: &TransformOptions) -> Result<Script, TransformError> {
    let cm: Lrc<SourceMap> = Default::default();
    let filename = match &options.filename {
        Some(name) => FileName::Custom(name.clone()),
        None => FileName::Anon,
    };
    let fm = cm.new_source_file(Lrc::new(filename), source.to_string());

    let syntax = Syntax::Typescript(TsSyntax {
        tsx: options.jsx,
        decorators: true,
        ..Default::default()
    });
    let mut parser = Parser::new(syntax, StringInput::from(&*fm), None);
    let module = parser
        .parse_module()
        .map_err(|error| parse_error(&cm, &error))?;

    for error in parser.take_errors() {
        let error = parse_error(&cm, &error);
        warn!(filename = options.filename.as_deref(), %error, "recovered from syntax error");
    }

    Ok(Script { cm, module })
}

fn parse_error(cm: &SourceMap, error: &ParseError) -> TransformError {
    let loc = cm.lookup_char_pos(error.span().lo);
    TransformError::Parse {
        message: error.kind().msg().into_owned(),
        line: loc.line,
        column: loc.col.0,
    }
}

/// Replaces `export default { ... }` with the import declaration, the
/// decorated class and `export default <Class>;`.
///
/// A component without a usable `name` is named after the file stem from
/// `options`, or [`FALLBACK_CLASS_NAME`] without one.
///
/// Returns `None` and leaves the module untouched when there is no default
/// exported object literal, which includes modules this function already
/// converted.
pub fn convert_module(
    module: &mut Module,
    options: &TransformOptions,
) -> Result<Option<ComponentSummary>, TransformError> {
    let found = module.body.iter().enumerate().find_map(|(index, item)| match item {
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
            match unwrap_paren(&export.expr) {
                Expr::Object(object) => Some((index, object)),
                _ => None,
            }
        }
        _ => None,
    });
    let Some((index, object)) = found else {
        debug!("no default exported options object");
        return Ok(None);
    };

    let mut builder = convert_options(object)?;
    if builder.class_name().is_empty() {
        let name = options
            .filename
            .as_deref()
            .and_then(file_class_name)
            .unwrap_or_else(|| FALLBACK_CLASS_NAME.to_string());
        builder.set_class_name(name);
    }
    let summary = builder.summary();
    module.body.splice(index..=index, builder.finish());

    debug!(
        class = %summary.class_name,
        fields = summary.fields.len(),
        methods = summary.methods.len(),
        "converted options object"
    );
    Ok(Some(summary))
}

/// `src/my-card.vue` -> `MyCard`
fn file_class_name(filename: &str) -> Option<String> {
    let stem = Path::new(filename).file_stem()?.to_str()?;
    Some(class_name_from(stem)).filter(|name| !name.is_empty())
}

/// Serializes a module back to source text.
pub fn emit_module(script: &Script) -> Result<String, TransformError> {
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: Config::default().with_target(EsVersion::latest()),
            cm: script.cm.clone(),
            comments: None,
            wr: JsWriter::new(script.cm.clone(), "\n", &mut buf, None),
        };
        emitter
            .emit_module(&script.module)
            .map_err(|error| TransformError::Emit(error.to_string()))?;
    }
    String::from_utf8(buf).map_err(|error| TransformError::Emit(error.to_string()))
}

/// Converts the options object of a component script into a class component.
pub fn transform(source: &str, options: TransformOptions) -> Result<TransformResult, TransformError> {
    let mut script = parse_script(source, &options)?;
    let component = convert_module(&mut script.module, &options)?;
    let code = emit_module(&script)?;
    Ok(TransformResult { code, component })
}
