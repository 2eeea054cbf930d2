//! Diagnostics.
//!
//! The library surfaces exactly one error type, fatal and parse-time
//! only — the tokenizer, transforms, and code generator never fail by
//! construction, since they only ever see shapes the parser already
//! validated. `ParseError` carries enough to render a useful message on
//! its own (`Display`) while also exposing the structured fields a
//! caller like the CLI needs to build a richer `miette` report (source
//! excerpt, precise [`Loc`]).

use std::fmt;

use crate::loc::Loc;

#[derive(Debug, Clone, thiserror::Error)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub loc: Loc,
    /// A short excerpt of source starting at `loc`, for display.
    pub excerpt: String,
}

const EXCERPT_LEN: usize = 30;

impl ParseError {
    pub fn new(kind: ParseErrorKind, loc: Loc, source: &str) -> Self {
        let start = loc.pos as usize;
        let excerpt = source
            .get(start..)
            .map(|rest| rest.chars().take(EXCERPT_LEN).collect())
            .unwrap_or_default();
        Self { kind, loc, excerpt }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}\n  {}",
            self.kind,
            self.loc.line + 1,
            self.loc.col + 1,
            self.excerpt
        )
    }
}

/// The error kinds enumerated in the parser's design: every way an
/// embedded markup expression can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("bad element name")]
    BadElementName,

    #[error("unterminated start tag")]
    UnterminatedStartTag,

    #[error("element `{tag}` is missing a close tag")]
    MissingCloseTag { tag: String },

    #[error("mismatched open/close tags: expected `{expected}`, found `{found}`")]
    MismatchedTags { expected: String, found: String },

    #[error("malformed close tag")]
    MalformedCloseTag,

    #[error("unrecognized content in begin tag")]
    UnrecognizedContentInBeginTag,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("unterminated parentheses")]
    UnterminatedParentheses,

    #[error("unterminated multi-line comment")]
    UnterminatedBlockComment,

    #[error("unterminated html comment")]
    UnterminatedHtmlComment,

    #[error("unexpected value for JSX property")]
    UnexpectedJsxPropertyValue,
}

pub type ParseResult<T> = Result<T, ParseError>;
