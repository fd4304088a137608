//! # attachlog CLI
//!
//! Command-line interface for the attachlog library.

use std::process;

use clap::Parser as ClapParser;

use attachlog::AttachlogError;
use attachlog::cli::Args;
use attachlog::core::extract_file;
use attachlog::report::stderr_reporter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), AttachlogError> {
    let args = <Args as ClapParser>::parse();
    let config = args.to_config();

    // Nothing could ever match.
    if config.is_noop() {
        return Ok(());
    }

    let reporter = stderr_reporter(config.verbosity);
    extract_file(&args.logfile, &args.outcsv, &config, &reporter)?;

    Ok(())
}
