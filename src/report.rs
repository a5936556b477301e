//! Run accumulator and end-of-run reporting.
//!
//! Three append-only logs populated while the collector walks the
//! manifest: overwritten files, missing files, and clone errors. They are
//! pure output, never read back during the run, and their order follows
//! manifest iteration order exactly.

use crate::error::Error;
use crate::output::OutputConfig;

/// Identifies one requested file for reporting purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub tool: String,
    pub ruleset: String,
    /// Destination path for overwrites, requested relative path for misses.
    pub path: String,
    pub repo: String,
    pub branch: String,
}

impl FileRecord {
    fn overwritten_line(&self) -> String {
        format!(
            "Tool: {}, Ruleset: {}, File: {} (from {}, branch - {}) is overwritten",
            self.tool, self.ruleset, self.path, self.repo, self.branch
        )
    }

    fn missing_line(&self) -> String {
        format!(
            "Tool: {}, Ruleset: {}, File: {} not found in {}, branch - {}",
            self.tool, self.ruleset, self.path, self.repo, self.branch
        )
    }
}

/// Everything a run wants to tell the user at the end.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files whose destination already existed before the copy.
    pub overwritten: Vec<FileRecord>,
    /// Requested paths absent from a successfully cloned repository.
    pub missing: Vec<FileRecord>,
    /// Clone failures, one per failed repository.
    pub errors: Vec<Error>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Print the overwritten/missing breakdown: counts always, itemized
    /// lists at verbose >= 1.
    pub fn print_summary(&self, verbose: u8, out: &OutputConfig) {
        if !self.overwritten.is_empty() {
            println!(
                "\n{}",
                out.warn(&format!("Total overwritten files: {}", self.overwritten.len()))
            );
            if verbose >= 1 {
                println!(
                    "{}",
                    out.warn("The following files were overwritten during the bundling process:")
                );
                for record in &self.overwritten {
                    println!("{}", out.warn(&format!("  - {}", record.overwritten_line())));
                }
            }
        }

        if !self.missing.is_empty() {
            println!(
                "\n{}",
                out.error(&format!("Total missing files: {}", self.missing.len()))
            );
            if verbose >= 1 {
                println!(
                    "{}",
                    out.error("The following files were not found during the bundling process:")
                );
                for record in &self.missing {
                    println!("{}", out.error(&format!("  - {}", record.missing_line())));
                }
            }
        }
    }

    /// Print the clone-error list, if any.
    pub fn print_errors(&self, out: &OutputConfig) {
        if self.errors.is_empty() {
            return;
        }
        println!(
            "\n{}",
            out.error("The following errors occurred during the bundling process:")
        );
        for error in &self.errors {
            println!("{}", out.error(&format!("  - {}", error)));
        }
    }
}
