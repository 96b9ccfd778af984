//! Tracing configuration for the skroll tools.
//!
//! Supports three output formats controlled by `SKROLL_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Every token the scanner emits (a bare level applies to the skroll crates)
//! SKROLL_LOG=trace skroll-indent story.skroll
//!
//! # Codec repairs and capacity warnings only, as JSON
//! SKROLL_LOG=warn SKROLL_LOG_FORMAT=json skroll-indent story.skroll
//!
//! # Fine-grained filtering
//! SKROLL_LOG="skroll_scanner::scanner=debug" SKROLL_LOG_FORMAT=tree skroll-indent -
//! ```
//!
//! The subscriber is only initialised when `SKROLL_LOG` (or `RUST_LOG`) is
//! set. A value that is just a level is scoped to the skroll crates so
//! dependency noise stays out; anything with a target is used as written.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `SKROLL_LOG_FORMAT` value. Unknown values mean `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("SKROLL_LOG_FORMAT").unwrap_or_default())
    }
}

/// Crates a bare level applies to.
const SKROLL_TARGETS: [&str; 3] = ["skroll_scanner", "skroll_common", "skroll_cli"];

/// Turn a log setting into filter directives. `"debug"` becomes
/// `"skroll_scanner=debug,skroll_common=debug,skroll_cli=debug"`; a value
/// naming any target (or several directives) passes through unchanged.
pub fn scoped_directives(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value.contains('=') || value.contains(',') {
        return value.to_string();
    }
    SKROLL_TARGETS
        .iter()
        .map(|target| format!("{target}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Filter from `SKROLL_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    let value = std::env::var("SKROLL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_default();
    EnvFilter::builder().parse_lossy(scoped_directives(&value))
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `SKROLL_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr; stdout carries only the token listing.
pub fn init_tracing() {
    if std::env::var_os("SKROLL_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let registry = Registry::default().with(build_filter());
    match LogFormat::from_env() {
        LogFormat::Tree => registry
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true),
            )
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }

    #[test]
    fn bare_level_is_scoped_to_skroll_crates() {
        assert_eq!(
            scoped_directives(" debug "),
            "skroll_scanner=debug,skroll_common=debug,skroll_cli=debug"
        );
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(
            scoped_directives("skroll_scanner::scanner=trace"),
            "skroll_scanner::scanner=trace"
        );
        assert_eq!(scoped_directives("warn,skroll_cli=info"), "warn,skroll_cli=info");
        assert_eq!(scoped_directives(""), "");
    }
}
