//! Forward-only byte input for the scanner.

/// The scanner's view of the input: one byte of lookahead and single-byte
/// advances.
///
/// `advance(true)` marks the consumed byte as insignificant whitespace, which
/// moves the start of the token being recognized past it. The scanner only
/// ever consumes whitespace and line breaks this way, so its tokens are
/// zero-width and sit at the first significant byte after them.
pub trait Cursor {
    /// The next byte, or `None` at end of input.
    fn lookahead(&self) -> Option<u8>;

    /// Consume the lookahead byte. No-op at end of input.
    fn advance(&mut self, skip: bool);
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    fn lookahead(&self) -> Option<u8> {
        (**self).lookahead()
    }

    fn advance(&mut self, skip: bool) {
        (**self).advance(skip);
    }
}

/// A `Cursor` over an in-memory source text.
#[derive(Clone, Debug)]
pub struct SourceCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
    token_start: usize,
}

impl<'a> SourceCursor<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            token_start: 0,
        }
    }

    /// Start at `offset`, clamped to the end of input.
    #[must_use]
    pub fn at(source: &'a str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        Self {
            bytes: source.as_bytes(),
            offset,
            token_start: offset,
        }
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Start of the token being recognized: the offset after the last
    /// skipped byte, or where recognition began.
    #[inline]
    #[must_use]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Begin recognizing a new token at the current offset.
    #[inline]
    pub fn mark_token_start(&mut self) {
        self.token_start = self.offset;
    }

    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }
}

impl Cursor for SourceCursor<'_> {
    #[inline]
    fn lookahead(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    #[inline]
    fn advance(&mut self, skip: bool) {
        if self.offset < self.bytes.len() {
            self.offset += 1;
            if skip {
                self.token_start = self.offset;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/cursor_tests.rs"]
mod tests;
