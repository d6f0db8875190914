//! YAML configuration
//!
//! `RawConfig` is what the file says. `ResolvedConfig` is derived from it with
//! absolute paths and the `{date}` placeholder expanded; the raw value is never
//! modified.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Looked up in the current directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "slnx-mermaid.yml";

const DEFAULT_OUTPUT_FILE: &str = "dependency-graph-mermaid.md";
const DATE_PLACEHOLDER: &str = "{date}";
const DATE_FORMAT: &str = "%Y-%m-%d %H_%M_%S";

const DEFAULT_EXCLUDES: &[&str] = &[
    "Test",
    "Tests",
    "Testing",
    "Mock",
    "Mocks",
    "Stub",
    "Stubs",
    "Fake",
    "Fakes",
    "Enums",
    "AppHost",
    "WebHost",
    "ServiceDefaults",
    "Dto",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub solution: String,
    pub diagram: DiagramConfig,
    pub filters: FilterConfig,
    pub naming: NamingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagramConfig {
    /// Mermaid layout direction, passed through as-is (`TD`, `LR`, ...)
    pub direction: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            direction: "TD".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Projects whose id contains any of these (case-insensitive) are left out
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<String>,
    /// Post-strip name -> rendered label
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl RawConfig {
    /// Load a config file. A missing file is reported as `ConfigNotFound`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(path.to_path_buf()))
            }
            Err(e) => {
                return Err(Error::ConfigInvalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };
        Self::from_yaml(&content).map_err(|reason| Error::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Err("file is empty".to_string());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn to_yaml(&self) -> std::result::Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| e.to_string())
    }

    /// Starting config for a solution that has none yet
    pub fn template_for(solution: &Path) -> Self {
        let file_name = solution
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = solution
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            solution: file_name,
            diagram: DiagramConfig::default(),
            filters: FilterConfig {
                exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            },
            naming: NamingConfig {
                strip_prefix: Some(format!("{}_", stem)),
                aliases: BTreeMap::new(),
            },
            output: OutputConfig {
                file: Some(DEFAULT_OUTPUT_FILE.to_string()),
            },
        }
    }

    /// Produce a `ResolvedConfig` for a config file located at `config_path`.
    ///
    /// Relative `solution` and `output.file` are taken relative to the config
    /// file's directory. Blank values are passed through unchanged.
    pub fn resolve(&self, config_path: &Path) -> Result<ResolvedConfig> {
        let base = base_directory(config_path)?;

        let solution = if self.solution.trim().is_empty() {
            PathBuf::from(&self.solution)
        } else {
            msbuild::normalize(&base, &self.solution)
        };

        let output = match self.output.file.as_deref() {
            Some(file) if !file.trim().is_empty() => {
                let file = if file.contains(DATE_PLACEHOLDER) {
                    let now = chrono::Local::now().format(DATE_FORMAT).to_string();
                    file.replace(DATE_PLACEHOLDER, &now)
                } else {
                    file.to_string()
                };
                Some(msbuild::normalize(&base, &file))
            }
            _ => None,
        };

        Ok(ResolvedConfig {
            solution,
            direction: self.diagram.direction.clone(),
            exclude: self.filters.exclude.clone(),
            naming: self.naming.clone(),
            output,
        })
    }
}

/// Fully resolved, read-only settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub solution: PathBuf,
    pub direction: String,
    pub exclude: Vec<String>,
    pub naming: NamingConfig,
    pub output: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Fails with `SolutionNotFound` unless the solution file exists
    pub fn validate(self) -> Result<Self> {
        if !self.solution.is_file() {
            return Err(Error::SolutionNotFound(self.solution));
        }
        Ok(self)
    }
}

/// Directory of the config file, or the current directory for a blank path
fn base_directory(config_path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| Error::ConfigInvalid {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let raw = config_path.to_string_lossy();
    if raw.trim().is_empty() {
        return Ok(cwd);
    }

    let absolute = msbuild::normalize(&cwd, &raw);
    Ok(absolute.parent().map(Path::to_path_buf).unwrap_or(absolute))
}
