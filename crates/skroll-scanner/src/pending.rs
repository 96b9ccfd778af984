//! Tokens recognized during a scan burst but not yet reported.
//!
//! One forward scan can recognize several line breaks, several closed levels,
//! an opened level and a mismatched dedent at once, while each scan call
//! reports a single token. `PendingQueue` records what is owed and hands it
//! out strictly in order:
//!
//! 1. NEWLINE, once per line break
//! 2. DEDENT, once per closed level
//! 3. INDENTATION-ERROR
//! 4. INDENT
//!
//! The error and the indent are only ever owed together by the recovery for a
//! dedent that lands between two levels: the error is reported first, then
//! the offending width is opened as a fresh level.

use crate::token::Token;

/// The next owed token, as handed out by `PendingQueue::head`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owed {
    Newline,
    Dedent,
    IndentationError,
    Indent(u16),
}

impl Owed {
    #[must_use]
    pub const fn token(self) -> Token {
        match self {
            Owed::Newline => Token::Newline,
            Owed::Dedent => Token::Dedent,
            Owed::IndentationError => Token::IndentationError,
            Owed::Indent(width) => Token::Indent { width },
        }
    }
}

/// Counts and flags for owed tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PendingQueue {
    newlines: u16,
    dedents: u16,
    error: bool,
    indent: Option<u16>,
}

impl PendingQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            newlines: 0,
            dedents: 0,
            error: false,
            indent: None,
        }
    }

    pub(crate) const fn from_parts(
        newlines: u16,
        dedents: u16,
        error: bool,
        indent: Option<u16>,
    ) -> Self {
        Self {
            newlines,
            dedents,
            error,
            indent,
        }
    }

    #[inline]
    #[must_use]
    pub const fn newlines(&self) -> u16 {
        self.newlines
    }

    #[inline]
    #[must_use]
    pub const fn dedents(&self) -> u16 {
        self.dedents
    }

    #[inline]
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error
    }

    #[inline]
    #[must_use]
    pub const fn indent(&self) -> Option<u16> {
        self.indent
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.newlines == 0 && self.dedents == 0 && !self.error && self.indent.is_none()
    }

    /// The token that must be reported next, if any.
    #[must_use]
    pub const fn head(&self) -> Option<Owed> {
        if self.newlines > 0 {
            Some(Owed::Newline)
        } else if self.dedents > 0 {
            Some(Owed::Dedent)
        } else if self.error {
            Some(Owed::IndentationError)
        } else if let Some(width) = self.indent {
            Some(Owed::Indent(width))
        } else {
            None
        }
    }

    /// Remove the head. Returns what was removed.
    pub fn pop_head(&mut self) -> Option<Owed> {
        let head = self.head()?;
        match head {
            Owed::Newline => self.newlines -= 1,
            Owed::Dedent => self.dedents -= 1,
            Owed::IndentationError => self.error = false,
            Owed::Indent(_) => self.indent = None,
        }
        Some(head)
    }

    /// Whether another NEWLINE can be owed without overflowing the count.
    #[inline]
    #[must_use]
    pub const fn has_newline_room(&self) -> bool {
        self.newlines < u16::MAX
    }

    /// Owe one more NEWLINE. The count saturates; callers check
    /// `has_newline_room` first.
    pub(crate) fn add_newline(&mut self) {
        self.newlines = self.newlines.saturating_add(1);
    }

    pub(crate) fn add_dedents(&mut self, count: usize) {
        let count = u16::try_from(count).unwrap_or(u16::MAX);
        self.dedents = self.dedents.saturating_add(count);
    }

    pub(crate) fn set_indent(&mut self, width: u16) {
        self.indent = Some(width);
    }

    pub(crate) fn flag_error(&mut self) {
        self.error = true;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
#[path = "tests/pending_tests.rs"]
mod tests;
