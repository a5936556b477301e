//! Fetching rule repositories into the scratch workspace.
//!
//! Cloning goes through the system git command, which automatically
//! handles SSH keys from ~/.ssh/, credential helpers, personal access
//! tokens, and anything else configured in ~/.gitconfig.

use std::path::{Path, PathBuf};
use std::process::Command;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::output::OutputConfig;

/// Clone one repository at the requested ref into a fresh scratch
/// subdirectory and return the clone path.
///
/// The path is `{scratch_root}/{tool}/{uuid}`, so repeated fetches for the
/// same tool never collide. A clone failure (bad URL, unreachable host,
/// missing ref, auth) comes back as [`Error::GitClone`]; the caller records
/// it and moves on to the next repository.
pub fn fetch(
    url: &str,
    branch: &str,
    scratch_root: &Path,
    tool: &str,
    verbose: u8,
    out: &OutputConfig,
) -> Result<PathBuf> {
    let target_dir = scratch_root.join(tool).join(Uuid::new_v4().to_string());

    if verbose >= 1 {
        println!(
            "{}",
            out.info(&format!(
                "    Cloning {} (branch: {}) into {}",
                url,
                branch,
                target_dir.display()
            ))
        );
    }

    clone_shallow(url, branch, &target_dir)?;
    Ok(target_dir)
}

/// Clone a repository at a specific ref using shallow clone.
fn clone_shallow(url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
    if let Some(parent) = target_dir.parent() {
        std::fs::create_dir_all(parent)?;
    }

    log::debug!("git clone --depth=1 --branch {} {}", ref_name, url);

    // Execute git clone --depth=1 --branch <ref> <url> <target_dir>
    let output = Command::new("git")
        .args(["clone", "--depth=1", "--branch", ref_name, url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                - Personal access token set up\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.to_string()
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message,
        });
    }

    Ok(())
}

// Note: tests that actually clone live in tests/cli_e2e_bundle.rs behind
// the integration-tests feature; they exercise fetch against a local
// `git init` repository so no network is required.
