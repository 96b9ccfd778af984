//! Indentation width of leading whitespace.

use crate::cursor::Cursor;
use skroll_common::limits::TAB_STOP;

/// Width after expanding a tab at `width`: the next multiple of `TAB_STOP`.
#[inline]
#[must_use]
pub const fn next_tab_stop(width: u16) -> u16 {
    width.saturating_add(TAB_STOP - width % TAB_STOP)
}

/// Consume spaces, tabs and carriage returns, returning the resulting width.
///
/// Spaces count one column, tabs advance to the next tab stop, carriage
/// returns count nothing. Every consumed byte is skipped as insignificant.
/// The width saturates at `u16::MAX`.
pub fn read_indentation_width<C: Cursor + ?Sized>(cursor: &mut C) -> u16 {
    let mut width: u16 = 0;
    loop {
        match cursor.lookahead() {
            Some(b' ') => width = width.saturating_add(1),
            Some(b'\t') => width = next_tab_stop(width),
            Some(b'\r') => {}
            _ => return width,
        }
        cursor.advance(true);
    }
}

/// Skip carriage returns.
pub fn skip_carriage_returns<C: Cursor + ?Sized>(cursor: &mut C) {
    while cursor.lookahead() == Some(b'\r') {
        cursor.advance(true);
    }
}

#[cfg(test)]
#[path = "tests/column_tests.rs"]
mod tests;
