//! Vue single-file component plumbing for vue2ts.
//!
//! This crate is the thin layer around the class transformer that deals with
//! the `.vue` file itself:
//! - Locating the `<script>` block and its content
//! - Re-embedding converted code as a `<script lang="ts">` block
//! - Deriving the output path (`Foo.vue` -> `Foo2ts.vue`)
//!
//! # Example
//!
//! ```
//! use vue_sfc::ScriptBlock;
//!
//! let source = r#"<template><div /></template>
//! <script>
//! export default { name: "hello" }
//! </script>"#;
//!
//! let block = ScriptBlock::locate(source).unwrap();
//! assert!(block.content().contains("export default"));
//!
//! let rewritten = block.replace_with_ts("export default class Hello {}\n");
//! assert!(rewritten.contains(r#"<script lang="ts">"#));
//! ```

mod block;
mod error;
mod path;

pub use block::ScriptBlock;
pub use error::SfcError;
pub use path::{is_output_path, output_path, source_path, OUTPUT_SUFFIX};
