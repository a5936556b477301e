//! # Error Handling
//!
//! Centralized error type for the `scanio-rules` pipeline, built with
//! `thiserror`. Only two failure classes are recoverable during a run:
//! clone failures (collected and reported at the end) and missing source
//! files (tracked in the run report, not represented here). Everything
//! else (I/O failures, YAML structure errors, permission problems)
//! propagates to the top level and terminates the process with a non-zero
//! status.

use thiserror::Error;

/// Main error type for scanio-rules operations
#[derive(Error, Debug)]
pub enum Error {
    /// The rule manifest file does not exist at the given path.
    ///
    /// Fatal: no partial processing occurs.
    #[error("Rule manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// The manifest parsed as YAML but does not have the expected
    /// structure (missing `tools` mapping, non-sequence ruleset, ...).
    #[error("Manifest structure error: {message}")]
    ManifestParse { message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL and ref (branch/tag). Recoverable at
    /// the orchestrator level: the failure is recorded and iteration
    /// continues with the next repository.
    #[error("Git clone error for {url}@{r#ref}: {message}")]
    GitClone {
        url: String,
        r#ref: String,
        message: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_manifest_not_found() {
        let error = Error::ManifestNotFound {
            path: "/tmp/scanio_rules.yaml".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Rule manifest not found"));
        assert!(display.contains("/tmp/scanio_rules.yaml"));
    }

    #[test]
    fn test_error_display_manifest_parse() {
        let error = Error::ManifestParse {
            message: "expected a mapping under 'tools'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Manifest structure error"));
        assert!(display.contains("expected a mapping under 'tools'"));
    }

    #[test]
    fn test_error_display_git_clone() {
        let error = Error::GitClone {
            url: "https://github.com/test/rules.git".to_string(),
            r#ref: "main".to_string(),
            message: "Authentication failed".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git clone error"));
        assert!(display.contains("https://github.com/test/rules.git"));
        assert!(display.contains("main"));
        assert!(display.contains("Authentication failed"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }
}
