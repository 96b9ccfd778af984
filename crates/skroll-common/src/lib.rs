//! Common types and utilities for the Skroll indentation scanner.
//!
//! This crate provides foundational items shared by the scanner and its tools:
//! - Scanner limits and codec sizes
//! - Position types for mapping byte offsets to line/column locations

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
