//! `include-links` binary.
use anyhow::Result;
use clap::Parser;

use arduino_include_links::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.operation().to_string();
    logging::init_subscriber(args.verbose, &command);
    let log = logging::Logger::new(&command);

    commands::run(&args, &log)?;
    log.report_log_path();
    Ok(())
}
