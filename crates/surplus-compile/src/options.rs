//! Compilation options.
//!
//! `Options` is plain configuration data, `serde`-derived the same way
//! `fastnode-core::config::Config` is, so a caller (the CLI, or an
//! embedder) can load it from a JSON file as easily as building it by
//! hand. The field set mirrors the options table verbatim: `jsx`,
//! `sourcemap`, `sourcefile`, `targetfile`.

use serde::{Deserialize, Serialize};

/// What, if anything, `preprocess` should do with source map data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// Don't generate a source map.
    None,
    /// Return the source map alongside the generated code.
    Extract,
    /// Append the source map as a trailing percent-encoded data-URI comment.
    Append,
}

impl Default for SourceMapMode {
    fn default() -> Self {
        SourceMapMode::None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// `true` selects the JSX-like `{expr}`/`{...expr}` dialect for
    /// mixins, inserts, and dynamic property values; `false` selects the
    /// `@`-prefixed native dialect. Both dialects parse the same
    /// `<tag>...</tag>` element grammar. This is a whole-file setting,
    /// not mixed per expression.
    #[serde(default = "default_jsx")]
    pub jsx: bool,
    #[serde(default)]
    pub source_map: SourceMapMode,
    /// Name recorded as the `sources` entry in a generated source map.
    #[serde(default = "default_source_file")]
    pub source_file: String,
    /// File name the source map claims to describe.
    #[serde(default = "default_target_file")]
    pub target_file: String,
}

fn default_jsx() -> bool {
    true
}

fn default_source_file() -> String {
    "in.js".to_string()
}

fn default_target_file() -> String {
    "out.js".to_string()
}

impl Default for Options {
    fn default() -> Self {
        Self {
            jsx: default_jsx(),
            source_map: SourceMapMode::default(),
            source_file: default_source_file(),
            target_file: default_target_file(),
        }
    }
}
