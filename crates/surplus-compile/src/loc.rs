//! Source location tracking.
//!
//! Every AST node carries a [`Loc`] giving its position in the original
//! source. Unlike a byte-range `Span`, `Loc` is a single point
//! `(line, column, byte offset)` — this pipeline only ever needs start
//! positions (for diagnostics and source maps), never ranges.

use crate::token::{Token, TokenKind};

/// A position in the original source: zero-indexed line, zero-indexed
/// column (in bytes, not chars), and absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Loc {
    pub line: u32,
    pub col: u32,
    pub pos: u32,
}

impl Loc {
    pub const fn new(line: u32, col: u32, pos: u32) -> Self {
        Self { line, col, pos }
    }

    pub const fn start() -> Self {
        Self { line: 0, col: 0, pos: 0 }
    }

    /// Advance past one token. A newline token resets the column and bumps
    /// the line; every other token (including runs of opaque text) just
    /// advances the column and byte offset by its length.
    #[must_use]
    pub fn advance_token(self, tok: &Token<'_>) -> Loc {
        let len = tok.text.len() as u32;
        if tok.kind == TokenKind::Newline {
            Loc { line: self.line + 1, col: 0, pos: self.pos + len }
        } else {
            Loc { line: self.line, col: self.col + len, pos: self.pos + len }
        }
    }

    /// Advance by `n` bytes of ordinary (non-newline) text, as happens when
    /// the parser consumes only a prefix of an opaque text token.
    #[must_use]
    pub fn advance_bytes(self, n: usize) -> Loc {
        let n = n as u32;
        Loc { line: self.line, col: self.col + n, pos: self.pos + n }
    }

    /// Advance by a single character, correctly resetting the column on a
    /// newline. Used by the parser's byte cursor, which walks char by
    /// char rather than token by token.
    #[must_use]
    pub fn advance_char(self, ch: char) -> Loc {
        let len = ch.len_utf8() as u32;
        if ch == '\n' {
            Loc { line: self.line + 1, col: 0, pos: self.pos + len }
        } else {
            Loc { line: self.line, col: self.col + len, pos: self.pos + len }
        }
    }

    /// Advance across an arbitrary string, folding [`advance_char`] over
    /// each character. Used when the parser carves a property or insert's
    /// source text out of a larger slice and needs the correct starting
    /// `Loc` for it.
    #[must_use]
    pub fn advance_str(self, s: &str) -> Loc {
        s.chars().fold(self, Loc::advance_char)
    }
}
