//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8PathBuf;
use serde::Serialize;

/// What happened to one component file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The options object was converted.
    Converted,
    /// The script has no default exported options object.
    Skipped,
    /// Conversion failed.
    Failed,
}

/// The report for one component file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The input file.
    pub input: Utf8PathBuf,
    /// Where the converted file was written, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Utf8PathBuf>,
    /// The outcome.
    pub status: Status,
    /// The generated class name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Why the file was skipped or failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The converted file contents.
    #[serde(skip)]
    pub contents: Option<String>,
}

impl FileReport {
    pub fn skipped(input: Utf8PathBuf, message: impl Into<String>) -> Self {
        Self {
            input,
            output: None,
            status: Status::Skipped,
            class_name: None,
            message: Some(message.into()),
            contents: None,
        }
    }

    pub fn failed(input: Utf8PathBuf, message: impl Into<String>) -> Self {
        Self {
            input,
            output: None,
            status: Status::Failed,
            class_name: None,
            message: Some(message.into()),
            contents: None,
        }
    }
}

/// Summary of a conversion run.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    /// One report per component file, in walk order.
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn count(&self, status: Status) -> usize {
        self.files
            .iter()
            .filter(|report| report.status == status)
            .count()
    }

    /// Returns whether any file failed.
    pub fn has_failures(&self) -> bool {
        self.count(Status::Failed) > 0
    }

    /// Formats the summary line.
    pub fn format(&self) -> String {
        let converted = self.count(Status::Converted);
        let skipped = self.count(Status::Skipped);
        let failed = self.count(Status::Failed);

        let file_word = |n: usize| if n == 1 { "file" } else { "files" };
        let error_word = if failed == 1 { "error" } else { "errors" };

        format!(
            "====================================\nvue2ts converted {} {}, skipped {} {} and found {} {}",
            converted,
            file_word(converted),
            skipped,
            file_word(skipped),
            failed,
            error_word
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    converted: usize,
    skipped: usize,
    failed: usize,
    files: &'a [FileReport],
}

/// Formats run reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the whole run.
    pub fn format(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(summary),
            OutputFormat::Json => self.format_json(summary),
        }
    }

    fn format_human(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        for report in &summary.files {
            let line = match report.status {
                Status::Converted => {
                    let class = report.class_name.as_deref().unwrap_or_default();
                    match &report.output {
                        Some(path) => {
                            format!("converted {} -> {} (class {})", report.input, path, class)
                        }
                        None => format!("converted {} (class {})", report.input, class),
                    }
                }
                Status::Skipped => format!(
                    "skipped {}: {}",
                    report.input,
                    report.message.as_deref().unwrap_or_default()
                ),
                Status::Failed => format!(
                    "error {}: {}",
                    report.input,
                    report.message.as_deref().unwrap_or_default()
                ),
            };
            output.push_str(&line);
            output.push('\n');
        }

        output.push_str(&summary.format());
        output.push('\n');
        output
    }

    fn format_json(&self, summary: &RunSummary) -> String {
        let report = JsonReport {
            converted: summary.count(Status::Converted),
            skipped: summary.count(Status::Skipped),
            failed: summary.count(Status::Failed),
            files: &summary.files,
        };
        serde_json::to_string_pretty(&report).unwrap_or_default()
    }
}
