//! Centralized limits for the indentation scanner.
//!
//! These values are part of the meaning of a serialized scanner state: a
//! buffer written with one set of limits is only guaranteed to restore
//! faithfully under the same limits. They are compile-time constants for that
//! reason and are not exposed as runtime configuration.
//!
//! # Categories
//!
//! - **Capacity Limits**: maximum indentation nesting
//! - **Column Computation**: tab stop width
//! - **State Codec**: byte sizes of the serialized state layout

// =============================================================================
// Capacity Limits
// =============================================================================

/// Maximum number of levels on the indentation stack, root level included.
///
/// Once the stack holds this many levels, a line indented deeper than the
/// current top opens no new level and queues no INDENT: it is treated as
/// belonging to the top level. Indentation deeper than the 1024th level is
/// therefore indistinguishable from the 1024th level itself.
///
/// # Skroll example
///
/// ```text
/// scene a:
///     beat b:
///         beat c:
///             ... 1023 nested levels later, further nesting is flattened
/// ```
pub const MAX_INDENT_LEVELS: usize = 1024;

// =============================================================================
// Column Computation
// =============================================================================

/// Tab stop width used when expanding tabs in leading whitespace.
///
/// A tab advances the width to the next multiple of this value:
/// width 3 followed by a tab is 8, width 8 followed by a tab is 16.
pub const TAB_STOP: u16 = 8;

// =============================================================================
// State Codec
// =============================================================================

/// Size in bytes of the stack depth header.
pub const DEPTH_HEADER_LEN: usize = 2;

/// Size in bytes of one serialized stack width.
pub const WIDTH_LEN: usize = 2;

/// Size in bytes of the trailer following the stack widths:
/// dedent count (2), newline count (2), indent flag (1), indent width (2),
/// error flag (1).
pub const STATE_TRAILER_LEN: usize = 8;

/// Largest buffer `serialize` can produce (a full stack plus the trailer).
pub const MAX_SERIALIZED_LEN: usize =
    DEPTH_HEADER_LEN + MAX_INDENT_LEVELS * WIDTH_LEN + STATE_TRAILER_LEN;

/// Size of the serialized initial state (root level only, nothing pending).
pub const INITIAL_SERIALIZED_LEN: usize = DEPTH_HEADER_LEN + WIDTH_LEN + STATE_TRAILER_LEN;
