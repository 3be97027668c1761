//! Output path derivation.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SfcError;

/// Suffix appended to the base name of a converted file.
pub const OUTPUT_SUFFIX: &str = "2ts";

/// Returns the path a converted component is written to.
///
/// The output sits next to the input and keeps its extension:
/// `src/Card.vue` becomes `src/Card2ts.vue`.
pub fn output_path(input: &Utf8Path) -> Result<Utf8PathBuf, SfcError> {
    let stem = input
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| SfcError::InvalidPath(input.to_path_buf()))?;

    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_SUFFIX}.{ext}"),
        None => format!("{stem}{OUTPUT_SUFFIX}"),
    };

    Ok(input.with_file_name(file_name))
}

/// Returns the input `path` would have been produced from, if its name has
/// the output suffix: `src/Card2ts.vue` gives `src/Card.vue`.
pub fn source_path(path: &Utf8Path) -> Option<Utf8PathBuf> {
    let stem = path
        .file_stem()?
        .strip_suffix(OUTPUT_SUFFIX)
        .filter(|stem| !stem.is_empty())?;
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    };
    Some(path.with_file_name(file_name))
}

/// Returns whether `path` is a file produced by [`output_path`], that is,
/// whether it has the output suffix and its source file sits next to it.
///
/// A component that merely has a name ending in the suffix, such as
/// `Step2ts.vue` without a `Step.vue`, is not an output.
pub fn is_output_path(path: &Utf8Path) -> bool {
    source_path(path).is_some_and(|source| source.is_file())
}
