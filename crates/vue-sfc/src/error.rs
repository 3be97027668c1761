//! SFC error types.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error raised while reading the structure of a single-file component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfcError {
    /// No `<script>` block was found in the file.
    #[error("no <script> block found in the component")]
    MissingScriptBlock,

    /// A `<script>` block exists but contains no code.
    #[error("the <script> block of the component is empty")]
    EmptyScriptContent,

    /// The path has no file name to derive an output path from.
    #[error("cannot derive an output path from `{0}`")]
    InvalidPath(Utf8PathBuf),
}
