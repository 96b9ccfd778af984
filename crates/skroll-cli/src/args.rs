use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the skroll-indent binary.
#[derive(Parser, Debug)]
#[command(
    name = "skroll-indent",
    version,
    about = "Print the INDENT/DEDENT/NEWLINE tokens of a Skroll document"
)]
pub struct CliArgs {
    /// Document to scan, or `-` to read standard input.
    pub input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the serialized scanner state (hex) after each token.
    #[arg(long)]
    pub states: bool,

    /// Checkpoint at the first token boundary at or after this byte offset,
    /// resume from it and check that the rest of the stream matches.
    #[arg(long = "resume-at", value_name = "OFFSET")]
    pub resume_at: Option<usize>,

    /// Disable colored token names in text output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl CliArgs {
    /// Whether the input is standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `line:col KIND [width]` line per token.
    Text,
    /// A JSON array of token records.
    Json,
}
