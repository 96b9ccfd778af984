//! The stack of open indentation levels.
//!
//! The bottom level is always width 0 (the document root) and widths strictly
//! increase toward the top. Both properties hold by construction: the only
//! ways to grow the stack are `push`, which refuses widths that do not exceed
//! the top, and `from_levels`, which repairs its input.

use skroll_common::limits::MAX_INDENT_LEVELS;
use smallvec::SmallVec;

/// Levels kept inline before spilling to the heap.
const INLINE_LEVELS: usize = 16;

/// Capacity-bounded stack of indentation widths.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndentStack {
    levels: SmallVec<[u16; INLINE_LEVELS]>,
}

impl IndentStack {
    /// A stack holding only the root level.
    #[must_use]
    pub fn new() -> Self {
        let mut levels = SmallVec::new();
        levels.push(0);
        Self { levels }
    }

    /// Rebuild a stack from raw widths, repairing what would break the
    /// invariants.
    ///
    /// The first width is forced to 0, input stops at the first width that
    /// does not exceed its predecessor, and at most `MAX_INDENT_LEVELS`
    /// widths are kept. Returns the stack and whether anything was repaired.
    pub fn from_levels(widths: impl IntoIterator<Item = u16>) -> (Self, bool) {
        let mut stack = Self::new();
        let mut widths = widths.into_iter();
        let mut repaired = match widths.next() {
            Some(root) => root != 0,
            None => false,
        };
        for width in widths {
            if !stack.push(width) {
                repaired = true;
                break;
            }
        }
        (stack, repaired)
    }

    /// Number of levels, root included. Never zero.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Width of the innermost open level.
    #[inline]
    #[must_use]
    pub fn current(&self) -> u16 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// All levels, root first.
    #[inline]
    #[must_use]
    pub fn levels(&self) -> &[u16] {
        &self.levels
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.levels.len() >= MAX_INDENT_LEVELS
    }

    /// Open a level. Refused (returns false) when the stack is full or when
    /// `width` does not exceed the current level.
    pub fn push(&mut self, width: u16) -> bool {
        if self.is_full() || width <= self.current() {
            return false;
        }
        self.levels.push(width);
        true
    }

    /// Close the innermost level. The root is never popped.
    pub fn pop(&mut self) -> Option<u16> {
        if self.levels.len() > 1 {
            self.levels.pop()
        } else {
            None
        }
    }

    /// How many levels sit strictly deeper than `width`. These are the
    /// levels a line at `width` closes.
    #[must_use]
    pub fn levels_above(&self, width: u16) -> usize {
        self.levels
            .iter()
            .rev()
            .take_while(|&&level| level > width)
            .count()
    }

    /// The level that is on top once `closed` levels are popped. Popping
    /// never reaches below the root.
    #[must_use]
    pub fn level_after_closing(&self, closed: usize) -> u16 {
        let remaining = self.levels.len().saturating_sub(closed).max(1);
        self.levels[remaining - 1]
    }

    /// Drop back to the root level.
    pub fn reset(&mut self) {
        self.levels.truncate(1);
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/indent_stack_tests.rs"]
mod tests;
