//! # Rule Manifest Schema and Parsing
//!
//! Defines the data structures behind `scanio_rules.yaml` and the logic
//! for loading it. The manifest maps tool names to rulesets, and each
//! ruleset to an ordered list of source repositories:
//!
//! ```yaml
//! tools:
//!   semgrep:
//!     rulesets:
//!       default:
//!         - repo: https://github.com/example/rules.git
//!           branch: main
//!           paths: [generic/secrets.yml, python/django.yml]
//! ```
//!
//! Document order matters: tools, rulesets, and repositories are processed
//! exactly in the order they appear, so later repositories in a ruleset may
//! deliberately overwrite files placed by earlier ones. The parser therefore
//! walks raw `serde_yaml` mappings (which preserve insertion order) instead
//! of deserializing into unordered maps.
//!
//! No schema validation happens beyond what structural access requires; a
//! malformed manifest surfaces as a structure error at the offending node.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// One source repository within a ruleset: where to clone from and which
/// files to take.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSpec {
    /// The URL of the Git repository to fetch rules from.
    pub repo: String,
    /// The Git ref to clone. Treated as an opaque name resolved by git;
    /// branches and tags both work.
    pub branch: String,
    /// Relative paths of the rule files to copy, in order.
    pub paths: Vec<String>,
}

/// A named ruleset: an ordered list of repositories contributing files.
#[derive(Debug, Clone)]
pub struct RulesetSection {
    pub name: String,
    pub repos: Vec<RepoSpec>,
}

/// A named tool with its rulesets, in document order.
#[derive(Debug, Clone)]
pub struct ToolSection {
    pub name: String,
    pub rulesets: Vec<RulesetSection>,
}

/// The loaded rule manifest.
///
/// Read-only after load. `source_path` is kept so the verbatim manifest
/// file can be copied to the destination root at the end of a run.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub source_path: PathBuf,
    pub tools: Vec<ToolSection>,
}

impl Manifest {
    /// Load and parse the manifest from disk.
    ///
    /// Fails with [`Error::ManifestNotFound`] when the path does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Manifest> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let tools = parse(&content)?;
        Ok(Manifest {
            source_path: path.to_path_buf(),
            tools,
        })
    }
}

impl RulesetSection {
    /// Build the single-tool, single-ruleset backup document written next
    /// to the copied files as `scanio_rules.yaml.back`:
    ///
    /// `{tools: {<tool>: {rulesets: {<ruleset>: <repos>}}}}`
    pub fn backup_slice(&self, tool: &str) -> Result<String> {
        let repos = serde_yaml::to_value(&self.repos)?;

        let mut rulesets = Mapping::new();
        rulesets.insert(Value::from(self.name.as_str()), repos);
        let mut tool_body = Mapping::new();
        tool_body.insert(Value::from("rulesets"), Value::Mapping(rulesets));
        let mut tools = Mapping::new();
        tools.insert(Value::from(tool), Value::Mapping(tool_body));
        let mut root = Mapping::new();
        root.insert(Value::from("tools"), Value::Mapping(tools));

        Ok(serde_yaml::to_string(&Value::Mapping(root))?)
    }
}

/// Parse manifest YAML into tool sections, preserving document order.
pub fn parse(yaml_content: &str) -> Result<Vec<ToolSection>> {
    let root: Value = serde_yaml::from_str(yaml_content)?;
    let root = as_mapping(&root, "manifest root")?;

    let tools_value = get(root, "tools", "manifest root")?;
    let tools_map = as_mapping(tools_value, "'tools'")?;

    let mut tools = Vec::new();
    for (name, body) in tools_map {
        let name = as_str(name, "tool name")?;
        let body = as_mapping(body, &format!("tool '{}'", name))?;

        let rulesets_value = get(body, "rulesets", &format!("tool '{}'", name))?;
        let rulesets_map = as_mapping(rulesets_value, &format!("'{}.rulesets'", name))?;

        let mut rulesets = Vec::new();
        for (ruleset_name, repos) in rulesets_map {
            let ruleset_name = as_str(ruleset_name, "ruleset name")?;
            let repos: Vec<RepoSpec> = serde_yaml::from_value(repos.clone())?;
            rulesets.push(RulesetSection {
                name: ruleset_name.to_string(),
                repos,
            });
        }

        tools.push(ToolSection {
            name: name.to_string(),
            rulesets,
        });
    }

    Ok(tools)
}

fn as_mapping<'a>(value: &'a Value, what: &str) -> Result<&'a Mapping> {
    value.as_mapping().ok_or_else(|| Error::ManifestParse {
        message: format!("expected a mapping for {}", what),
    })
}

fn as_str<'a>(value: &'a Value, what: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| Error::ManifestParse {
        message: format!("expected a string for {}", what),
    })
}

fn get<'a>(map: &'a Mapping, key: &str, context: &str) -> Result<&'a Value> {
    map.get(Value::from(key)).ok_or_else(|| Error::ManifestParse {
        message: format!("missing '{}' key in {}", key, context),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
tools:
  semgrep:
    rulesets:
      default:
        - repo: https://github.com/example/rules.git
          branch: main
          paths: [a/b.yml, missing.yml]
      web:
        - repo: https://github.com/example/web-rules.git
          branch: v1.2.0
          paths: [xss.yml]
  bandit:
    rulesets:
      default:
        - repo: https://github.com/example/bandit-rules.git
          branch: develop
          paths: [profiles/strict.yml]
"#;

    #[test]
    fn test_parse_preserves_tool_and_ruleset_order() {
        let tools = parse(SAMPLE).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "semgrep");
        assert_eq!(tools[1].name, "bandit");

        let rulesets: Vec<&str> = tools[0]
            .rulesets
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(rulesets, vec!["default", "web"]);
    }

    #[test]
    fn test_parse_repo_spec_fields() {
        let tools = parse(SAMPLE).unwrap();
        let repo = &tools[0].rulesets[0].repos[0];
        assert_eq!(repo.repo, "https://github.com/example/rules.git");
        assert_eq!(repo.branch, "main");
        assert_eq!(repo.paths, vec!["a/b.yml", "missing.yml"]);
    }

    #[test]
    fn test_parse_missing_tools_key() {
        let result = parse("rulesets: {}");
        assert!(matches!(result, Err(Error::ManifestParse { .. })));
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("missing 'tools'"));
    }

    #[test]
    fn test_parse_tool_without_rulesets() {
        let result = parse("tools:\n  semgrep: {}\n");
        assert!(matches!(result, Err(Error::ManifestParse { .. })));
    }

    #[test]
    fn test_parse_repo_entry_missing_branch() {
        let yaml = r#"
tools:
  semgrep:
    rulesets:
      default:
        - repo: https://github.com/example/rules.git
          paths: [a.yml]
"#;
        let result = parse(yaml);
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Manifest::load("/nonexistent/scanio_rules.yaml");
        assert!(matches!(result, Err(Error::ManifestNotFound { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("scanio_rules.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.source_path, path);
        assert_eq!(manifest.tools.len(), 2);
    }

    #[test]
    fn test_backup_slice_round_trips() {
        let tools = parse(SAMPLE).unwrap();
        let ruleset = &tools[0].rulesets[0];

        let slice = ruleset.backup_slice("semgrep").unwrap();
        let reparsed = parse(&slice).unwrap();

        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0].name, "semgrep");
        assert_eq!(reparsed[0].rulesets.len(), 1);
        assert_eq!(reparsed[0].rulesets[0].name, "default");

        let repo = &reparsed[0].rulesets[0].repos[0];
        assert_eq!(repo.repo, "https://github.com/example/rules.git");
        assert_eq!(repo.branch, "main");
        assert_eq!(repo.paths, vec!["a/b.yml", "missing.yml"]);
    }

    #[test]
    fn test_backup_slice_scoped_to_one_ruleset() {
        let tools = parse(SAMPLE).unwrap();
        let slice = tools[0].rulesets[1].backup_slice("semgrep").unwrap();
        assert!(slice.contains("web"));
        assert!(!slice.contains("a/b.yml"));
    }
}
