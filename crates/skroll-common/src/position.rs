//! Line/column positions for byte offsets.
//!
//! Scanner tokens carry byte spans; tools that report them to people need
//! zero-based line and column numbers. `LineMap` records where each line
//! starts once and answers lookups by binary search.

use serde::Serialize;

/// A zero-based line/column location. Columns count bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Byte offsets of line starts in a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    line_starts: Vec<u32>,
    len: u32,
}

impl LineMap {
    /// Build a line map. Only `\n` terminates a line; a `\r` before it is
    /// part of the preceding line.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (index, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(index as u32 + 1);
            }
        }
        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Number of lines, counting a final empty line after a trailing `\n`.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to the
    /// end of the text.
    #[must_use]
    pub fn position_of(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line as u32, offset - self.line_starts[line])
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
