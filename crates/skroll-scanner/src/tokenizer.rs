//! Whole-document driver for the scanner.
//!
//! `Tokenizer` calls `Scanner::scan` the way a host parser does and, when the
//! scanner declines, steps over the rest of the line's content in place of
//! the grammar's other lexical rules. It yields only structural tokens.
//!
//! A `Checkpoint` taken between tokens holds everything needed to carry on
//! from that point: resuming it against the same text produces exactly the
//! tokens the original run produced after it.

use crate::cursor::{Cursor, SourceCursor};
use crate::scanner::Scanner;
use crate::state::ScannerState;
use crate::token::{Token, TokenSet};
use serde::Serialize;
use std::ops::Range;

/// A structural token and where it was reported.
///
/// Structural tokens consume only insignificant whitespace, so `start ==
/// end` in practice: the offset of the first significant byte after the
/// whitespace (or the end of input).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScannedToken {
    pub token: Token,
    pub start: usize,
    pub end: usize,
}

impl ScannedToken {
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Saved position plus serialized scanner state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    pub offset: usize,
    pub state: Vec<u8>,
}

/// Drives a `Scanner` across a source text.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: SourceCursor<'a>,
    scanner: Scanner,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: SourceCursor::new(source),
            scanner: Scanner::new(),
        }
    }

    /// Continue lexing `source` from a checkpoint. The state is restored with
    /// the lenient codec, so a damaged checkpoint degrades instead of failing.
    #[must_use]
    pub fn resume(source: &'a str, checkpoint: &Checkpoint) -> Self {
        Self {
            cursor: SourceCursor::at(source, checkpoint.offset),
            scanner: Scanner::from_state(ScannerState::deserialize(&checkpoint.state)),
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    #[inline]
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.cursor.offset(),
            state: self.scanner.to_bytes(),
        }
    }

    /// One scan call with an explicit acceptance mask. Content is not
    /// skipped: `None` means the scanner declined at the current offset.
    pub fn next_with(&mut self, valid: TokenSet) -> Option<ScannedToken> {
        self.cursor.mark_token_start();
        let token = self.scanner.scan(&mut self.cursor, valid)?;
        Some(ScannedToken {
            token,
            start: self.cursor.token_start(),
            end: self.cursor.offset(),
        })
    }

    /// Step over non-structural bytes up to the next line feed. Returns
    /// whether anything was consumed.
    pub fn skip_line_content(&mut self) -> bool {
        let start = self.cursor.offset();
        while let Some(byte) = self.cursor.lookahead() {
            if byte == b'\n' {
                break;
            }
            self.cursor.advance(false);
        }
        self.cursor.offset() > start
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = ScannedToken;

    fn next(&mut self) -> Option<ScannedToken> {
        loop {
            if let Some(token) = self.next_with(TokenSet::all()) {
                return Some(token);
            }
            // With every kind accepted the scanner only declines on content
            // or at a fully closed end of input.
            if self.cursor.is_at_end() || !self.skip_line_content() {
                return None;
            }
        }
    }
}

/// Every structural token of `source`.
#[must_use]
pub fn tokenize(source: &str) -> Vec<ScannedToken> {
    Tokenizer::new(source).collect()
}

#[cfg(test)]
#[path = "tests/tokenizer_tests.rs"]
mod tests;
