//! Structural token kinds and the grammar's acceptance mask.

use serde::Serialize;
use std::fmt;

/// Kinds of structural tokens, in the grammar's external-token order.
///
/// The discriminant is the index a host uses for its `valid_symbols` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum TokenKind {
    Indent = 0,
    Dedent = 1,
    Newline = 2,
    IndentationError = 3,
}

impl TokenKind {
    /// All kinds in index order.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Indent,
        TokenKind::Dedent,
        TokenKind::Newline,
        TokenKind::IndentationError,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TokenKind::Indent),
            1 => Some(TokenKind::Dedent),
            2 => Some(TokenKind::Newline),
            3 => Some(TokenKind::IndentationError),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::IndentationError => "INDENTATION_ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token reported by one scan call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// Opens a level at `width` columns.
    Indent { width: u16 },
    /// Closes the innermost open level.
    Dedent,
    /// Ends a line. Blank lines each produce one.
    Newline,
    /// A dedent landed between two open levels.
    IndentationError,
}

impl Token {
    #[must_use]
    pub const fn kind(self) -> TokenKind {
        match self {
            Token::Indent { .. } => TokenKind::Indent,
            Token::Dedent => TokenKind::Dedent,
            Token::Newline => TokenKind::Newline,
            Token::IndentationError => TokenKind::IndentationError,
        }
    }

    /// Width carried by an INDENT.
    #[must_use]
    pub const fn width(self) -> Option<u16> {
        match self {
            Token::Indent { width } => Some(width),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Indent { width } => write!(f, "INDENT({width})"),
            other => f.write_str(other.kind().name()),
        }
    }
}

bitflags::bitflags! {
    /// Token kinds the grammar accepts on the current call.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TokenSet: u8 {
        const INDENT = 1 << 0;
        const DEDENT = 1 << 1;
        const NEWLINE = 1 << 2;
        const INDENTATION_ERROR = 1 << 3;
    }
}

impl TokenSet {
    #[must_use]
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Indent => TokenSet::INDENT,
            TokenKind::Dedent => TokenSet::DEDENT,
            TokenKind::Newline => TokenSet::NEWLINE,
            TokenKind::IndentationError => TokenSet::INDENTATION_ERROR,
        }
    }

    #[must_use]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(TokenSet::of(kind))
    }

    /// Build a mask from a host's `valid_symbols` array indexed by
    /// `TokenKind::index`. Missing entries are rejected, extra entries
    /// (the grammar's own symbols past the external ones) are ignored.
    #[must_use]
    pub fn from_valid_symbols(valid: &[bool]) -> Self {
        TokenKind::ALL
            .iter()
            .filter(|kind| valid.get(kind.index()).copied().unwrap_or(false))
            .fold(TokenSet::empty(), |set, &kind| set | TokenSet::of(kind))
    }
}

impl From<TokenKind> for TokenSet {
    fn from(kind: TokenKind) -> Self {
        TokenSet::of(kind)
    }
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
