//! Scanner state and its byte encoding.
//!
//! A host that re-parses only the edited part of a document saves the
//! scanner state at token boundaries and restores it when lexing resumes
//! there. The encoding is a fixed little-endian layout:
//!
//! ```text
//! u16 depth
//! u16 width × depth          root first
//! u16 pending dedents
//! u16 pending newlines
//! u8  pending indent flag
//! u16 pending indent width   0 when no indent is pending
//! u8  indentation error flag
//! ```
//!
//! Two readers are provided. `ScannerState::deserialize` is the host-facing
//! one: it never fails, defaults whatever the buffer is missing and repairs
//! anything that would break the stack or queue invariants. `ScannerState::decode`
//! rejects every buffer `serialize` could not have produced.

use crate::indent_stack::IndentStack;
use crate::pending::PendingQueue;
use skroll_common::limits::{
    DEPTH_HEADER_LEN, MAX_INDENT_LEVELS, STATE_TRAILER_LEN, WIDTH_LEN,
};
use thiserror::Error;
use tracing::warn;

/// Why a buffer was rejected by `ScannerState::decode`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("state buffer ends inside the {field} field")]
    Truncated { field: &'static str },

    #[error("stack depth {depth} is outside 1..={max}", max = MAX_INDENT_LEVELS)]
    DepthOutOfRange { depth: u16 },

    #[error("root indentation level is {width}, expected 0")]
    NonZeroRoot { width: u16 },

    #[error("indentation level {index} has width {width}, not above the previous level {previous}")]
    NonIncreasingLevel {
        index: usize,
        width: u16,
        previous: u16,
    },

    #[error("{dedents} pending dedents exceed the {open} open levels")]
    DedentsExceedDepth { dedents: u16, open: usize },

    #[error("{field} flag byte is {value}, expected 0 or 1")]
    InvalidFlag { field: &'static str, value: u8 },

    #[error("pending indent width {width} does not exceed the level {level} it would open above")]
    IndentNotDeeper { width: u16, level: u16 },

    #[error("pending indent would overflow a full indentation stack")]
    IndentOnFullStack,

    #[error("indent width {width} recorded without a pending indent")]
    StrayIndentWidth { width: u16 },

    #[error("{count} unexpected bytes after the state")]
    TrailingBytes { count: usize },
}

/// Everything the scanner carries between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScannerState {
    pub(crate) stack: IndentStack,
    pub(crate) pending: PendingQueue,
}

impl ScannerState {
    /// Root level only, nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn stack(&self) -> &IndentStack {
        &self.stack
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    /// Number of bytes `serialize` writes for this state.
    #[must_use]
    pub fn serialized_len(&self) -> usize {
        DEPTH_HEADER_LEN + self.stack.depth() * WIDTH_LEN + STATE_TRAILER_LEN
    }

    /// Append the encoded state to `buffer`, returning the number of bytes
    /// written.
    pub fn serialize(&self, buffer: &mut Vec<u8>) -> usize {
        let start = buffer.len();
        buffer.reserve(self.serialized_len());

        // Depth never exceeds MAX_INDENT_LEVELS, which fits a u16.
        let depth = self.stack.depth() as u16;
        buffer.extend_from_slice(&depth.to_le_bytes());
        for width in self.stack.levels() {
            buffer.extend_from_slice(&width.to_le_bytes());
        }
        buffer.extend_from_slice(&self.pending.dedents().to_le_bytes());
        buffer.extend_from_slice(&self.pending.newlines().to_le_bytes());
        let indent = self.pending.indent();
        buffer.push(u8::from(indent.is_some()));
        buffer.extend_from_slice(&indent.unwrap_or(0).to_le_bytes());
        buffer.push(u8::from(self.pending.has_error()));

        buffer.len() - start
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.serialized_len());
        self.serialize(&mut buffer);
        buffer
    }

    /// Restore a state from a host buffer. Never fails.
    ///
    /// - an empty buffer is the initial state;
    /// - the depth is clamped to `1..=MAX_INDENT_LEVELS` and to the widths the
    ///   buffer actually holds;
    /// - fields are read in order and the first one that does not fit ends
    ///   the read: it and every later field default to zero/false;
    /// - the stack is repaired as in `IndentStack::from_levels`, pending
    ///   dedents are clamped to the open levels, and a pending indent that
    ///   could not be pushed when its turn comes is dropped.
    #[must_use]
    pub fn deserialize(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::new();
        }

        let mut reader = ByteReader::new(bytes);
        let Some(declared) = reader.read_u16() else {
            warn!(len = bytes.len(), "scanner state too short for its depth header, resetting");
            return Self::new();
        };
        let depth = usize::from(declared).clamp(1, MAX_INDENT_LEVELS);
        if depth != usize::from(declared) {
            warn!(declared, depth, "scanner state depth out of range, clamped");
        }

        let mut widths = Vec::with_capacity(depth);
        while widths.len() < depth {
            match reader.read_u16() {
                Some(width) => widths.push(width),
                None => break,
            }
        }
        if widths.len() < depth {
            warn!(declared, present = widths.len(), "scanner state stack truncated");
        }
        let (stack, repaired) = IndentStack::from_levels(widths);
        if repaired {
            warn!(levels = ?stack.levels(), "scanner state stack repaired");
        }

        let dedents = reader.read_u16().unwrap_or(0);
        let newlines = reader.read_u16().unwrap_or(0);
        let indent_flag = reader.read_u8().unwrap_or(0) != 0;
        let indent_width = reader.read_u16().unwrap_or(0);
        let error = reader.read_u8().unwrap_or(0) != 0;

        let open = stack.depth() - 1;
        let dedents = if usize::from(dedents) > open {
            warn!(dedents, open, "pending dedents exceed open levels, clamped");
            open as u16
        } else {
            dedents
        };

        let indent = if indent_flag {
            let landing = stack.level_after_closing(usize::from(dedents));
            let full = dedents == 0 && stack.is_full();
            if indent_width <= landing || full {
                warn!(indent_width, landing, full, "pending indent cannot open a level, dropped");
                None
            } else {
                Some(indent_width)
            }
        } else {
            None
        };

        Self {
            stack,
            pending: PendingQueue::from_parts(newlines, dedents, error, indent),
        }
    }

    /// Decode a buffer produced by `serialize`, rejecting anything else.
    /// An empty buffer decodes to the initial state.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }

        let mut reader = ByteReader::new(bytes);
        let depth = reader.expect_u16("depth")?;
        if depth == 0 || usize::from(depth) > MAX_INDENT_LEVELS {
            return Err(DecodeError::DepthOutOfRange { depth });
        }

        let root = reader.expect_u16("stack width")?;
        if root != 0 {
            return Err(DecodeError::NonZeroRoot { width: root });
        }
        let mut stack = IndentStack::new();
        for index in 1..usize::from(depth) {
            let width = reader.expect_u16("stack width")?;
            let previous = stack.current();
            if !stack.push(width) {
                return Err(DecodeError::NonIncreasingLevel {
                    index,
                    width,
                    previous,
                });
            }
        }

        let dedents = reader.expect_u16("pending dedents")?;
        let open = stack.depth() - 1;
        if usize::from(dedents) > open {
            return Err(DecodeError::DedentsExceedDepth { dedents, open });
        }
        let newlines = reader.expect_u16("pending newlines")?;
        let indent_flag = reader.expect_flag("pending indent")?;
        let indent_width = reader.expect_u16("pending indent width")?;
        let error = reader.expect_flag("indentation error")?;

        let indent = if indent_flag {
            let level = stack.level_after_closing(usize::from(dedents));
            if indent_width <= level {
                return Err(DecodeError::IndentNotDeeper {
                    width: indent_width,
                    level,
                });
            }
            if dedents == 0 && stack.is_full() {
                return Err(DecodeError::IndentOnFullStack);
            }
            Some(indent_width)
        } else if indent_width != 0 {
            return Err(DecodeError::StrayIndentWidth {
                width: indent_width,
            });
        } else {
            None
        };

        if reader.remaining() > 0 {
            return Err(DecodeError::TrailingBytes {
                count: reader.remaining(),
            });
        }

        Ok(Self {
            stack,
            pending: PendingQueue::from_parts(newlines, dedents, error, indent),
        })
    }
}

/// Little-endian reads over a byte slice. The first read that does not fit
/// stops the reader: it and every later read return `None`.
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    stopped: bool,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            stopped: false,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        if self.stopped {
            return None;
        }
        let Some(chunk) = self.bytes.get(self.pos..self.pos + N) else {
            self.stopped = true;
            return None;
        };
        self.pos += N;
        let mut out = [0; N];
        out.copy_from_slice(chunk);
        Some(out)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[byte]| byte)
    }

    fn read_u16(&mut self) -> Option<u16> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn expect_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        self.read_u16().ok_or(DecodeError::Truncated { field })
    }

    fn expect_flag(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        match self.read_u8() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(value) => Err(DecodeError::InvalidFlag { field, value }),
            None => Err(DecodeError::Truncated { field }),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
