use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use skroll_cli::args::CliArgs;
use skroll_cli::driver;

fn main() -> Result<()> {
    // Initialize tracing if SKROLL_LOG or RUST_LOG is set.
    // Supports SKROLL_LOG_FORMAT=tree|json|text (see tracing_config.rs).
    skroll_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stdout().is_terminal();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = driver::run(&args, color, &mut out)?;
    out.flush().context("failed to flush standard output")?;

    if code != driver::EXIT_SUCCESS {
        std::process::exit(code);
    }
    Ok(())
}
