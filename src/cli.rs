//! CLI argument parsing and pipeline execution

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use scanio_rules::clean::clean_destination;
use scanio_rules::collector::collect;
use scanio_rules::manifest::Manifest;
use scanio_rules::output::OutputConfig;

/// Build rule sets from a scanio_rules.yaml manifest
#[derive(Parser, Debug)]
#[command(name = "scanio-rules")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Path to the scanio_rules.yaml manifest
    #[arg(short, long, value_name = "PATH", default_value = "scanio_rules.yaml")]
    rules: PathBuf,

    /// Force clean the rules directory without confirmation
    #[arg(short, long)]
    force: bool,

    /// Directory where rules will be stored
    #[arg(long, value_name = "PATH", default_value = "rules")]
    rules_dir: PathBuf,

    /// Increase verbosity level (-v: per-repo progress, -vv: per-file lines)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// Execute the bundling pipeline.
    pub fn execute(self) -> Result<()> {
        let out = OutputConfig::from_env_and_flag(self.no_color);

        let manifest = Manifest::load(&self.rules)?;

        // The one interactive decision point, before any cloning begins.
        clean_destination(&self.rules_dir, self.force, &out)?;

        let scratch = tempfile::TempDir::new()?;
        if self.verbose >= 1 {
            println!(
                "{}",
                out.info(&format!(
                    "Using temporary directory: {}",
                    scratch.path().display()
                ))
            );
        }

        let report = collect(
            &manifest,
            scratch.path(),
            &self.rules_dir,
            self.verbose,
            &out,
        )?;

        drop(scratch);
        println!(
            "\n{}",
            out.ok("Temporary directory cleaned up automatically.")
        );

        report.print_summary(self.verbose, &out);

        if report.has_errors() {
            report.print_errors(&out);
            anyhow::bail!(
                "{} repository clone failure(s) during the bundling process",
                report.errors.len()
            );
        }

        Ok(())
    }
}
