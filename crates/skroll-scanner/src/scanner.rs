//! The per-call scanning state machine.
//!
//! Every call to `Scanner::scan` reports at most one token. Owed tokens are
//! always handed out before any new input is read; only with nothing owed
//! does the scanner look at the input, and then it reads a whole run of line
//! breaks, blank lines and the next line's indentation in one go, queueing
//! everything that run implies.
//!
//! Stack changes are applied when the corresponding token is reported, not
//! when it is recognized: a DEDENT pops as it is emitted and an INDENT pushes
//! as it is emitted. A state saved between the two therefore restores
//! exactly.

use crate::column::{read_indentation_width, skip_carriage_returns};
use crate::cursor::Cursor;
use crate::indent_stack::IndentStack;
use crate::pending::{Owed, PendingQueue};
use crate::state::{DecodeError, ScannerState};
use crate::token::{Token, TokenKind, TokenSet};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// Indentation scanner for one lexing session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scanner {
    state: ScannerState,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_state(state: ScannerState) -> Self {
        Self { state }
    }

    /// Back to the initial state: root level only, nothing owed.
    pub fn reset(&mut self) {
        self.state.stack.reset();
        self.state.pending.clear();
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn stack(&self) -> &IndentStack {
        &self.state.stack
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> &PendingQueue {
        &self.state.pending
    }

    /// Whether the stack has reached `MAX_INDENT_LEVELS`. While it has,
    /// deeper lines open no level.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.state.stack.is_full()
    }

    /// Append the serialized state to `buffer`. See `ScannerState::serialize`.
    pub fn serialize(&self, buffer: &mut Vec<u8>) -> usize {
        self.state.serialize(buffer)
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.state.to_bytes()
    }

    /// Replace the state from a host buffer. Never fails; see
    /// `ScannerState::deserialize`.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        self.state = ScannerState::deserialize(bytes);
    }

    /// Replace the state from a buffer, rejecting malformed input. The state
    /// is left untouched on error.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        self.state = ScannerState::decode(bytes)?;
        Ok(())
    }

    /// Recognize at most one structural token at the cursor.
    ///
    /// Returns `None` when the input at the cursor is not indentation-related
    /// (the caller's other lexical rules take over), when the input is
    /// exhausted with nothing left to close, or when `valid` rejects the
    /// token that must come next. In the last case nothing is consumed and
    /// the state is unchanged: a rejected token is never skipped in favour
    /// of a later one.
    pub fn scan<C: Cursor + ?Sized>(&mut self, cursor: &mut C, valid: TokenSet) -> Option<Token> {
        if let Some(owed) = self.state.pending.head() {
            return self.emit(owed, valid);
        }

        skip_carriage_returns(cursor);
        match cursor.lookahead() {
            Some(b'\n') => {
                // Every run opens with a NEWLINE; don't consume one the
                // grammar cannot take.
                if !valid.accepts(TokenKind::Newline) {
                    trace!("newline not accepted, leaving line break unread");
                    return None;
                }
                self.scan_line_breaks(cursor);
                let owed = self.state.pending.head()?;
                self.emit(owed, valid)
            }
            None => self.close_at_end(valid),
            Some(_) => None,
        }
    }

    /// Report `owed` if the grammar accepts it, applying its stack change.
    fn emit(&mut self, owed: Owed, valid: TokenSet) -> Option<Token> {
        let token = owed.token();
        if !valid.accepts(token.kind()) {
            trace!(%token, "owed token not accepted");
            return None;
        }
        self.state.pending.pop_head();
        match owed {
            Owed::Dedent => {
                self.state.stack.pop();
            }
            Owed::Indent(width) => {
                if !self.state.stack.push(width) {
                    warn!(width, depth = self.state.stack.depth(), "indent did not open a level");
                }
            }
            Owed::Newline | Owed::IndentationError => {}
        }
        trace!(%token, depth = self.state.stack.depth(), "emit");
        Some(token)
    }

    /// Consume a line break, any blank lines after it and the indentation of
    /// the next line with content, queueing the tokens they imply.
    ///
    /// A run ends early, with its last line break unread, once the queue
    /// holds as many NEWLINEs as it can count. That line break then starts a
    /// fresh run after the queue drains.
    fn scan_line_breaks<C: Cursor + ?Sized>(&mut self, cursor: &mut C) {
        cursor.advance(true);
        self.state.pending.add_newline();

        let width = loop {
            let width = read_indentation_width(cursor);
            if cursor.lookahead() != Some(b'\n') {
                break width;
            }
            if !self.state.pending.has_newline_room() {
                debug!(
                    newlines = self.state.pending.newlines(),
                    "newline queue full, ending run before next line break"
                );
                return;
            }
            cursor.advance(true);
            self.state.pending.add_newline();
        };

        trace!(
            newlines = self.state.pending.newlines(),
            width,
            at_end = cursor.lookahead().is_none(),
            "scanned line breaks"
        );

        if cursor.lookahead().is_none() {
            let open = self.state.stack.depth() - 1;
            self.state.pending.add_dedents(open);
            return;
        }
        self.queue_indentation_change(width);
    }

    /// Compare a content line's width with the open levels.
    fn queue_indentation_change(&mut self, width: u16) {
        let stack = &self.state.stack;
        let current = stack.current();
        match width.cmp(&current) {
            Ordering::Equal => {}
            Ordering::Greater => {
                if stack.is_full() {
                    warn!(width, current, "indentation stack full, deeper level not opened");
                } else {
                    self.state.pending.set_indent(width);
                }
            }
            Ordering::Less => {
                let closed = stack.levels_above(width);
                let landing = stack.level_after_closing(closed);
                self.state.pending.add_dedents(closed);
                if width > landing {
                    // The root is 0, so landing below `width` is the only
                    // way to miss: the line sits between two open levels.
                    debug!(width, landing, closed, "dedent matches no open level");
                    self.state.pending.flag_error();
                    self.state.pending.set_indent(width);
                }
            }
        }
    }

    /// End of input with nothing owed: close one remaining level per call.
    fn close_at_end(&mut self, valid: TokenSet) -> Option<Token> {
        if self.state.stack.depth() <= 1 {
            return None;
        }
        if !valid.accepts(TokenKind::Dedent) {
            return None;
        }
        self.state.stack.pop();
        trace!(depth = self.state.stack.depth(), "dedent at end of input");
        Some(Token::Dedent)
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
