//! The bundling orchestrator.
//!
//! Walks the manifest in document order (tool, then ruleset, then repo
//! list order), fetching each repository into the scratch workspace and
//! copying the requested files into the destination tree. Clone failures
//! are local to their repository entry: they are recorded and iteration
//! continues, so one unreachable repo never blocks its siblings or the
//! ruleset's backup file.

use std::path::Path;

use crate::error::{Error, Result};
use crate::git;
use crate::manifest::{Manifest, RulesetSection};
use crate::output::OutputConfig;
use crate::report::{FileRecord, RunReport};

/// Name of the per-ruleset backup written next to the copied files.
pub const RULESET_BACKUP_NAME: &str = "scanio_rules.yaml.back";

/// Name of the full manifest copy written at the destination root.
pub const FULL_BACKUP_NAME: &str = "scanio_rules.yaml";

/// Identifies where a file copy came from, for report records.
#[derive(Debug, Clone, Copy)]
pub struct CopyContext<'a> {
    pub tool: &'a str,
    pub ruleset: &'a str,
    pub repo: &'a str,
    pub branch: &'a str,
}

impl CopyContext<'_> {
    fn record(&self, path: String) -> FileRecord {
        FileRecord {
            tool: self.tool.to_string(),
            ruleset: self.ruleset.to_string(),
            path,
            repo: self.repo.to_string(),
            branch: self.branch.to_string(),
        }
    }
}

/// Run the full pipeline over a loaded manifest.
///
/// `scratch_root` holds the clones and is owned by the caller; `dest` is
/// the destination tree root, created as needed. Returns the accumulated
/// report; only clone failures end up in it, anything else is fatal and
/// propagates.
pub fn collect(
    manifest: &Manifest,
    scratch_root: &Path,
    dest: &Path,
    verbose: u8,
    out: &OutputConfig,
) -> Result<RunReport> {
    let mut report = RunReport::new();
    std::fs::create_dir_all(dest)?;

    for tool in &manifest.tools {
        if verbose >= 1 {
            println!("{}", out.info(&format!("Processing tool: {}", tool.name)));
        }
        let tool_path = dest.join(&tool.name);
        std::fs::create_dir_all(&tool_path)?;

        for ruleset in &tool.rulesets {
            if verbose >= 1 {
                println!(
                    "{}",
                    out.info(&format!("  Processing ruleset: {}", ruleset.name))
                );
            }
            let ruleset_path = tool_path.join(&ruleset.name);
            std::fs::create_dir_all(&ruleset_path)?;

            for spec in &ruleset.repos {
                if verbose >= 1 {
                    println!(
                        "{}",
                        out.info(&format!("    Processing rules from: {}", spec.repo))
                    );
                }

                let ctx = CopyContext {
                    tool: &tool.name,
                    ruleset: &ruleset.name,
                    repo: &spec.repo,
                    branch: &spec.branch,
                };

                match git::fetch(&spec.repo, &spec.branch, scratch_root, &tool.name, verbose, out)
                {
                    Ok(clone_path) => {
                        copy_files(
                            &spec.paths,
                            &clone_path,
                            &ruleset_path,
                            ctx,
                            &mut report,
                            verbose,
                            out,
                        )?;
                    }
                    Err(e @ Error::GitClone { .. }) => {
                        // Recoverable: record and move to the next repo.
                        // Skipped repos produce no missing-file records.
                        println!("{}", out.error(&format!("Error cloning {}: {}", spec.repo, e)));
                        report.errors.push(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            write_ruleset_backup(&ruleset_path, &tool.name, ruleset, verbose, out)?;
            if verbose >= 1 {
                println!(
                    "    {}",
                    out.ok(&format!("Finished processing ruleset: {}", ruleset.name))
                );
            }
        }
        if verbose >= 1 {
            println!(
                "{}",
                out.ok(&format!("Finished processing tool: {}", tool.name))
            );
        }
    }

    write_full_backup(manifest, dest, verbose, out)?;

    Ok(report)
}

/// Copy the requested relative paths from a cloned repo into the ruleset
/// directory, tracking missing sources and overwritten destinations.
///
/// Each path is independent; there is no rollback. An unexpected I/O error
/// on one copy aborts the run.
pub fn copy_files(
    paths: &[String],
    src_root: &Path,
    dest_root: &Path,
    ctx: CopyContext<'_>,
    report: &mut RunReport,
    verbose: u8,
    out: &OutputConfig,
) -> Result<()> {
    for path in paths {
        let src = src_root.join(path);
        let dest = dest_root.join(path);

        // Ensure destination directory exists before copying
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !src.exists() {
            report.missing.push(ctx.record(path.clone()));
            if verbose >= 2 {
                println!(
                    "{}",
                    out.error(&format!("      Warning: {} not found in {}", path, ctx.repo))
                );
            }
            continue;
        }

        if dest.exists() {
            report.overwritten.push(ctx.record(dest.display().to_string()));
            if verbose >= 2 {
                println!(
                    "{}",
                    out.warn(&format!("      Overwriting {}", dest.display()))
                );
            }
        } else if verbose >= 2 {
            println!(
                "{}",
                out.ok(&format!("      Copied {} to {}", path, dest.display()))
            );
        }

        std::fs::copy(&src, &dest)?;
    }

    Ok(())
}

/// Write the one-tool, one-ruleset manifest slice into the ruleset
/// directory.
fn write_ruleset_backup(
    ruleset_path: &Path,
    tool: &str,
    ruleset: &RulesetSection,
    verbose: u8,
    out: &OutputConfig,
) -> Result<()> {
    let backup_file = ruleset_path.join(RULESET_BACKUP_NAME);
    std::fs::write(&backup_file, ruleset.backup_slice(tool)?)?;

    if verbose >= 1 {
        println!(
            "{}",
            out.ok(&format!(
                "    Backup of tool-specific YAML saved to {}",
                backup_file.display()
            ))
        );
    }
    Ok(())
}

/// Copy the original manifest file verbatim to the destination root.
fn write_full_backup(
    manifest: &Manifest,
    dest: &Path,
    verbose: u8,
    out: &OutputConfig,
) -> Result<()> {
    let backup_file = dest.join(FULL_BACKUP_NAME);
    std::fs::copy(&manifest.source_path, &backup_file)?;

    if verbose >= 1 {
        println!(
            "{}",
            out.ok(&format!(
                "Backup of the entire manifest saved to {}",
                backup_file.display()
            ))
        );
    }
    Ok(())
}
