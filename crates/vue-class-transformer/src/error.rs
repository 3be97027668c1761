//! Transformation error types.

use thiserror::Error;

/// An error raised while converting a component script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The script could not be parsed.
    #[error("failed to parse script at {line}:{column}: {message}")]
    Parse {
        /// The parser's description of the problem.
        message: String,
        /// 1-based line of the error within the script.
        line: usize,
        /// 0-based column of the error within the script.
        column: usize,
    },

    /// The converted module could not be serialized.
    #[error("failed to emit converted script: {0}")]
    Emit(String),

    /// An option has a value of a shape the converter does not understand.
    #[error("`{option}` must be {expected}")]
    UnexpectedShape {
        /// The option key, e.g. `methods`.
        option: String,
        /// A description of the accepted shapes.
        expected: &'static str,
    },

    /// The `data` function has no top-level `return` statement.
    #[error("`data` does not return anything")]
    MissingDataReturn,

    /// The `data` function returns something other than an object literal.
    #[error("`data` must return an object literal")]
    DataNotObject,

    /// A prop declares a `type` that is not a constructor or list of constructors.
    #[error("prop `{prop}` has an invalid `type`; expected a constructor or an array of constructors")]
    InvalidPropType {
        /// The prop name.
        prop: String,
    },

    /// An element of the array form of `props` is not a string literal.
    #[error("`props` array elements must be string literals")]
    InvalidPropName,
}

impl TransformError {
    pub(crate) fn shape(option: impl Into<String>, expected: &'static str) -> Self {
        Self::UnexpectedShape {
            option: option.into(),
            expected,
        }
    }
}
