//! Command-line surface.
use std::path::PathBuf;

use clap::Parser;

use crate::reconcile::Operation;

/// Version reported by `--version` and the log header.
///
/// Set from `INCLUDE_LINKS_VERSION` (release builds or `git describe`) by the
/// build script, falling back to the package version.
pub const VERSION: &str = match option_env!("INCLUDE_LINKS_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Command-line entry point for header link management.
#[derive(Parser, Debug)]
#[command(
    name = "include-links",
    about = "Link this repository's headers into an Arduino installation's avr include directory",
    version = VERSION
)]
pub struct Cli {
    /// Create or refresh links for every header (default)
    #[arg(short, long, conflicts_with = "remove")]
    pub install: bool,

    /// Remove links previously created for the headers
    #[arg(short, long)]
    pub remove: bool,

    /// Arduino installation path, e.g. ~/arduino-1.8.19
    #[arg(short = 'a', long = "arduino-installation-path", value_name = "PATH")]
    pub arduino_installation_path: PathBuf,

    /// Repository root containing the include/ directory [default: current directory]
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The operation selected by the flags; install unless `--remove` is given.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        if self.remove {
            Operation::Remove
        } else {
            Operation::Install
        }
    }
}
