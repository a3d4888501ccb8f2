//! `sonolight` command-line launcher.
//!
//! # Responsibility
//! - Inspect and seed the data directory without the desktop UI.
//! - Map failures to a non-zero exit code and one error line on stderr.

mod cli;

use clap::Parser;
use cli::{output, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli::run(cli) {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
