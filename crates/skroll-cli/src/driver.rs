//! Token listing, state dumps and the resume check behind `skroll-indent`.

use crate::args::{CliArgs, OutputFormat};
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use skroll_common::LineMap;
use skroll_scanner::{ScannedToken, TokenKind, Tokenizer};
use std::io::{Read, Write};
use tracing::{debug, info_span, warn};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_RESUME_MISMATCH: i32 = 1;

/// One emitted token as reported to the user. `line` and `column` are
/// one-based; `start`/`end` are byte offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub kind: TokenKind,
    pub width: Option<u16>,
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
    /// Hex-encoded scanner state right after this token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl TokenRecord {
    fn new(scanned: ScannedToken, lines: &LineMap, state: Option<String>) -> Self {
        let position = lines.position_of(u32::try_from(scanned.start).unwrap_or(u32::MAX));
        Self {
            kind: scanned.token.kind(),
            width: scanned.token.width(),
            start: scanned.start,
            end: scanned.end,
            line: position.line + 1,
            column: position.character + 1,
            state,
        }
    }
}

/// Outcome of checkpointing mid-document and resuming from there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResumeReport {
    /// Offset asked for on the command line.
    pub requested: usize,
    /// Offset of the checkpoint actually taken.
    pub checkpoint: usize,
    /// Hex-encoded state stored in the checkpoint.
    pub state: String,
    pub tokens_before: usize,
    /// Tokens the uninterrupted run produced after the checkpoint.
    pub expected: usize,
    /// Tokens the resumed run produced.
    pub resumed: usize,
    /// Index (within the suffix) of the first differing token.
    pub first_divergence: Option<usize>,
}

impl ResumeReport {
    #[must_use]
    pub fn matches(&self) -> bool {
        self.first_divergence.is_none()
    }
}

/// Read the document named by the arguments, or standard input for `-`.
pub fn load_source(args: &CliArgs) -> Result<String> {
    if args.reads_stdin() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;
        return Ok(source);
    }
    std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))
}

/// Lowercase hex, two digits per byte.
#[must_use]
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Scan `source` and describe every structural token.
#[must_use]
pub fn collect_records(source: &str, with_states: bool) -> Vec<TokenRecord> {
    let lines = LineMap::build(source);
    let mut tokenizer = Tokenizer::new(source);
    let mut records = Vec::new();
    while let Some(scanned) = tokenizer.next() {
        let state = with_states.then(|| hex(&tokenizer.scanner().to_bytes()));
        records.push(TokenRecord::new(scanned, &lines, state));
    }
    if tokenizer.scanner().is_saturated() {
        warn!("indentation deeper than the level limit was flattened");
    }
    debug!(
        bytes = source.len(),
        lines = lines.line_count(),
        tokens = records.len(),
        "scanned document"
    );
    records
}

/// Checkpoint at the first token boundary at or after `at` (or at the end of
/// the stream) and compare a resumed run against the uninterrupted one.
#[must_use]
pub fn check_resume(source: &str, at: usize) -> ResumeReport {
    let mut tokenizer = Tokenizer::new(source);
    let mut checkpoint = tokenizer.checkpoint();
    let mut tokens_before = 0;
    while tokenizer.offset() < at {
        if tokenizer.next().is_none() {
            break;
        }
        tokens_before += 1;
        checkpoint = tokenizer.checkpoint();
    }

    let expected: Vec<ScannedToken> = tokenizer.collect();
    let resumed: Vec<ScannedToken> = Tokenizer::resume(source, &checkpoint).collect();
    let first_divergence = expected
        .iter()
        .zip(&resumed)
        .position(|(left, right)| left != right)
        .or_else(|| (expected.len() != resumed.len()).then(|| expected.len().min(resumed.len())));

    debug!(
        checkpoint = checkpoint.offset,
        tokens_before,
        expected = expected.len(),
        "resume check"
    );

    ResumeReport {
        requested: at,
        checkpoint: checkpoint.offset,
        state: hex(&checkpoint.state),
        tokens_before,
        expected: expected.len(),
        resumed: resumed.len(),
        first_divergence,
    }
}

fn paint(kind: TokenKind, color: bool) -> ColoredString {
    let name = kind.name();
    if !color {
        return name.normal();
    }
    match kind {
        TokenKind::Indent => name.green(),
        TokenKind::Dedent => name.yellow(),
        TokenKind::Newline => name.dimmed(),
        TokenKind::IndentationError => name.red().bold(),
    }
}

/// `line:col KIND [width] [state]`, one token per line.
#[must_use]
pub fn render_text(records: &[TokenRecord], color: bool) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("{}:{} {}", record.line, record.column, paint(record.kind, color)));
        if let Some(width) = record.width {
            out.push_str(&format!(" {width}"));
        }
        if let Some(state) = &record.state {
            out.push_str(&format!("  {state}"));
        }
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_resume(report: &ResumeReport) -> String {
    let head = format!(
        "resume at byte {} (requested {}) after {} tokens:",
        report.checkpoint, report.requested, report.tokens_before
    );
    match report.first_divergence {
        None => format!("{head} {} tokens, suffix matches\n", report.expected),
        Some(index) => format!(
            "{head} suffix diverges at token {index} (expected {}, resumed {})\n",
            report.expected, report.resumed
        ),
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    tokens: &'a [TokenRecord],
    resume: &'a ResumeReport,
}

/// Run `skroll-indent` with parsed arguments, writing the listing to `out`.
/// Returns the process exit code.
pub fn run(args: &CliArgs, color: bool, out: &mut impl Write) -> Result<i32> {
    let _span = info_span!("skroll_indent", input = %args.input.display()).entered();

    let source = load_source(args)?;
    let records = collect_records(&source, args.states);

    let report = args.resume_at.map(|at| check_resume(&source, at));

    let rendered = match (args.format, &report) {
        (OutputFormat::Text, None) => render_text(&records, color),
        (OutputFormat::Text, Some(report)) => {
            format!("{}{}", render_text(&records, color), render_resume(report))
        }
        (OutputFormat::Json, None) => {
            let json = serde_json::to_string_pretty(&records)
                .context("failed to encode tokens as JSON")?;
            format!("{json}\n")
        }
        (OutputFormat::Json, Some(report)) => {
            let json = serde_json::to_string_pretty(&JsonOutput {
                tokens: &records,
                resume: report,
            })
            .context("failed to encode tokens as JSON")?;
            format!("{json}\n")
        }
    };
    out.write_all(rendered.as_bytes())
        .context("failed to write output")?;

    match report {
        Some(report) if !report.matches() => {
            warn!(
                checkpoint = report.checkpoint,
                divergence = report.first_divergence,
                "resumed token stream diverged"
            );
            Ok(EXIT_RESUME_MISMATCH)
        }
        _ => Ok(EXIT_SUCCESS),
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
