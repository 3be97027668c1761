//! Main orchestration logic.

use crate::cli::Args;
use crate::output::{FileReport, RunSummary, Status};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use thiserror::Error;
use tracing::{debug, info, warn};
use vue_class_transformer::{transform, TransformError, TransformOptions};
use vue_sfc::{is_output_path, output_path, ScriptBlock, SfcError};
use walkdir::WalkDir;

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("input path does not exist: {0}")]
    MissingInput(Utf8PathBuf),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// Failed to read a file.
    #[error("failed to read file: {0}")]
    ReadFailed(String),

    /// Failed to write a file.
    #[error("failed to write file: {0}")]
    WriteFailed(String),

    /// The component file has no usable script block.
    #[error(transparent)]
    Sfc(#[from] SfcError),

    /// The script could not be converted.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

const DEFAULT_IGNORES: [&str; 2] = ["**/node_modules/**", "**/dist/**"];

/// Converts every component under `args.input`.
///
/// Per-file failures are recorded in the summary and do not stop the run.
pub fn run(args: &Args) -> Result<RunSummary, ConvertError> {
    let files = find_components(&args.input, &args.ignore)?;
    debug!(count = files.len(), "found components");

    let options = TransformOptions {
        filename: None,
        jsx: args.jsx,
    };

    let mut summary = RunSummary::default();
    for file in files {
        let report = match convert_file(&file, &options, !args.stdout) {
            Ok(report) => report,
            Err(err) => {
                warn!(file = %file, error = %err, "conversion failed");
                FileReport::failed(file, err.to_string())
            }
        };
        summary.push(report);
    }
    Ok(summary)
}

/// Resolves the input to the list of component files to convert.
pub fn find_components(input: &Utf8Path, ignore: &[String]) -> Result<Vec<Utf8PathBuf>, ConvertError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }

    let ignore_set = build_ignore_set(ignore)?;
    let files = WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| p.extension() == Some("vue"))
        .filter(|p| !is_output_path(p))
        .filter(|p| {
            let relative = p.strip_prefix(input).unwrap_or(p);
            !ignore_set.is_match(relative.as_str())
        })
        .collect();
    Ok(files)
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ConvertError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns.iter().map(String::as_str).chain(DEFAULT_IGNORES) {
        let glob = Glob::new(pattern).map_err(|e| ConvertError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ConvertError::InvalidGlob(e.to_string()))
}

/// Converts one component file, writing the result next to it when `write`
/// is set.
pub fn convert_file(
    path: &Utf8Path,
    options: &TransformOptions,
    write: bool,
) -> Result<FileReport, ConvertError> {
    let source =
        fs::read_to_string(path).map_err(|e| ConvertError::ReadFailed(format!("{path}: {e}")))?;
    let block = ScriptBlock::locate(&source)?;

    let options = TransformOptions {
        filename: Some(path.to_string()),
        ..options.clone()
    };
    let result = transform(block.content(), options)
        .map_err(|err| relocate(err, &source[..block.content_offset()]))?;

    let Some(component) = result.component else {
        debug!(file = %path, "no options object to convert");
        return Ok(FileReport::skipped(
            path.to_path_buf(),
            "no default exported options object",
        ));
    };

    let contents = block.replace_with_ts(&result.code);
    let output = if write {
        let output = output_path(path)?;
        fs::write(&output, &contents)
            .map_err(|e| ConvertError::WriteFailed(format!("{output}: {e}")))?;
        info!(input = %path, output = %output, "converted component");
        Some(output)
    } else {
        None
    };

    Ok(FileReport {
        input: path.to_path_buf(),
        output,
        status: Status::Converted,
        class_name: Some(component.class_name),
        message: None,
        contents: Some(contents),
    })
}

/// Shifts a parse error from script-relative to file-relative lines.
fn relocate(err: TransformError, before_script: &str) -> TransformError {
    match err {
        TransformError::Parse {
            message,
            line,
            column,
        } => TransformError::Parse {
            message,
            line: line + before_script.matches('\n').count(),
            column,
        },
        other => other,
    }
}
