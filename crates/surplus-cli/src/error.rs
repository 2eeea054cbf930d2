use miette::Diagnostic;
use thiserror::Error;

/// CLI-level error wrapping, surfaced through `miette` for a readable
/// terminal report. `surplus_compile::ParseError` already carries a
/// `Loc` and an excerpt; this just adds the file-I/O cases that only
/// make sense at the binary boundary.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read options file {path}: {source}")]
    ReadOptions {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid options file {path}: {source}")]
    ParseOptions {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(surplus_compile::parse_error))]
    Compile(#[from] surplus_compile::ParseError),
}
