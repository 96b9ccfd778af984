//! Command-line tooling for the Skroll indentation scanner.
//!
//! - `args` - clap definitions for `skroll-indent`
//! - `driver` - token listing, state dumps and the checkpoint/resume check
//! - `tracing_config` - `SKROLL_LOG` subscriber setup

pub mod args;
pub mod driver;
pub mod tracing_config;
