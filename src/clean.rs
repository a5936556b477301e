//! Cleaning the destination rules directory before a run.
//!
//! This holds the only interactive decision point in the pipeline, so the
//! prompt happens at most once, before any cloning begins. Automated runs
//! bypass it with `--force`.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::error::Result;
use crate::output::OutputConfig;

/// Entries that never count as content and are never deleted.
const IGNORED_ENTRIES: [&str; 2] = [".gitignore", ".DS_Store"];

/// Empty the destination directory, asking first unless `force` is set.
///
/// A missing directory is a no-op. Declining the prompt leaves the tree
/// untouched; the pipeline then proceeds and may overwrite files in place.
pub fn clean_destination(dest: &Path, force: bool, out: &OutputConfig) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dest)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !IGNORED_ENTRIES.contains(&name.as_str()) {
            entries.push(entry.path());
        }
    }

    if entries.is_empty() {
        println!(
            "{}",
            out.ok(&format!(
                "Rules directory '{}' contains only '.gitignore' and/or '.DS_Store', no cleanup needed.",
                dest.display()
            ))
        );
        return Ok(());
    }

    if force {
        println!(
            "{}",
            out.warn(&format!(
                "Force cleaning the rules directory '{}' (without confirmation).",
                dest.display()
            ))
        );
        remove_entries(&entries)?;
        println!(
            "{}",
            out.ok(&format!("Cleaned up rules directory '{}'.", dest.display()))
        );
        return Ok(());
    }

    println!(
        "{}",
        out.error(&format!(
            "Rules directory '{}' is not empty ({} entries).",
            dest.display(),
            entries.len()
        ))
    );

    let confirmed = confirm_deletion(dest)?;

    if confirmed {
        remove_entries(&entries)?;
        println!(
            "{}",
            out.ok(&format!("Cleaned up rules directory '{}'.", dest.display()))
        );
    } else {
        println!(
            "{}",
            out.info(&format!(
                "Proceeding without cleaning the rules directory '{}'.",
                dest.display()
            ))
        );
    }

    Ok(())
}

/// Ask whether to delete the listed entries. Uses the interactive prompt
/// on a real terminal; with piped stdin it falls back to reading one y/N
/// line, so scripted runs without `--force` still get an answer through.
fn confirm_deletion(dest: &Path) -> Result<bool> {
    use std::io::{BufRead, Write};

    let prompt = format!(
        "Delete all files in '{}' (except .gitignore and .DS_Store)?",
        dest.display()
    );

    if console::user_attended() {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| std::io::Error::other(e).into())
    } else {
        print!("{} [y/N]: ", prompt);
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }
}

/// Files are removed directly, directories recursively.
fn remove_entries(entries: &[std::path::PathBuf]) -> Result<()> {
    for path in entries {
        if path.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_destination_is_noop() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("rules");
        let out = OutputConfig::without_color();

        clean_destination(&dest, true, &out).unwrap();
        assert!(!dest.exists());
    }

    #[test]
    fn test_ignored_entries_skip_cleanup() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".gitignore"), "*\n").unwrap();
        std::fs::write(temp.path().join(".DS_Store"), "").unwrap();
        let out = OutputConfig::without_color();

        clean_destination(temp.path(), true, &out).unwrap();
        assert!(temp.path().join(".gitignore").exists());
        assert!(temp.path().join(".DS_Store").exists());
    }

    #[test]
    fn test_force_clean_removes_files_and_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("x.txt"), "x").unwrap();
        std::fs::create_dir_all(temp.path().join("semgrep/default")).unwrap();
        std::fs::write(temp.path().join("semgrep/default/a.yml"), "a").unwrap();
        std::fs::write(temp.path().join(".gitignore"), "*\n").unwrap();
        let out = OutputConfig::without_color();

        clean_destination(temp.path(), true, &out).unwrap();

        assert!(!temp.path().join("x.txt").exists());
        assert!(!temp.path().join("semgrep").exists());
        // Ignored entries survive a force clean
        assert!(temp.path().join(".gitignore").exists());
    }

    // Note: the interactive decline path is covered end-to-end in
    // tests/cli_e2e_bundle.rs, where the prompt reads from a piped stdin.
}
