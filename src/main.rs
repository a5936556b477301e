//! # Scanio Rules CLI
//!
//! Binary entry point for the `scanio-rules` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Initializing logging from the `RUST_LOG` environment variable.
//! - Running the bundling pipeline and translating failures into a
//!   non-zero exit status.
//!
//! The pipeline itself lives in the library crate; the binary stays a thin
//! wrapper around it.

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();
    cli.execute()
}
