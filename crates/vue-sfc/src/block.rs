//! Script block location and replacement.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SfcError;

/// Matches from the first `<script ...>` to the last `</script>`.
const SCRIPT_BLOCK_PATTERN: &str = r"<script.*>([\s\S]*)</script>";

fn script_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SCRIPT_BLOCK_PATTERN).expect("script block pattern is valid"))
}

/// The `<script>` block of a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    source: &'a str,
    /// Byte range of the whole block, tags included.
    block: Range<usize>,
    /// Byte range of the code between the tags.
    content: Range<usize>,
}

impl<'a> ScriptBlock<'a> {
    /// Finds the script block in `source`.
    ///
    /// Fails with [`SfcError::MissingScriptBlock`] when there is no block and
    /// with [`SfcError::EmptyScriptContent`] when the block holds only
    /// whitespace.
    pub fn locate(source: &'a str) -> Result<Self, SfcError> {
        let captures = script_block_regex()
            .captures(source)
            .ok_or(SfcError::MissingScriptBlock)?;
        let (Some(block), Some(content)) = (captures.get(0), captures.get(1)) else {
            return Err(SfcError::MissingScriptBlock);
        };

        if content.as_str().trim().is_empty() {
            return Err(SfcError::EmptyScriptContent);
        }

        Ok(Self {
            source,
            block: block.range(),
            content: content.range(),
        })
    }

    /// Returns the code between the script tags.
    pub fn content(&self) -> &'a str {
        &self.source[self.content.clone()]
    }

    /// Returns the byte offset of the script content within the file.
    pub fn content_offset(&self) -> usize {
        self.content.start
    }

    /// Returns the file with the script block replaced by a
    /// `<script lang="ts">` block holding `code`.
    ///
    /// Everything outside the block is kept byte for byte.
    pub fn replace_with_ts(&self, code: &str) -> String {
        let before = &self.source[..self.block.start];
        let after = &self.source[self.block.end..];

        let mut out = String::with_capacity(self.source.len() + code.len());
        out.push_str(before);
        out.push_str("<script lang=\"ts\">\n");
        out.push_str(code.trim_end());
        out.push_str("\n</script>");
        out.push_str(after);
        out
    }
}
