//! Project configuration (dlgview.yaml) parsing.
//!
//! The config sets the default preview mode, the output directory, and
//! which files count as descriptors during discovery.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DlgError, Result};
use crate::types::MarginMode;

/// Project configuration loaded from dlgview.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Margin mode: 0 truncates margins, 1 keeps original coordinates.
    pub mode: MarginMode,

    /// Directory previews are written to.
    pub output: PathBuf,

    /// File extensions treated as descriptors when scanning directories.
    pub extensions: Vec<String>,

    /// Path patterns to skip when scanning.
    pub excludes: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            mode: MarginMode::Truncated,
            output: PathBuf::from("preview"),
            extensions: ["hpp", "h", "ext", "inc"].map(String::from).to_vec(),
            excludes: vec![],
        }
    }
}

impl PreviewConfig {
    /// Load config from a dlgview.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DlgError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load config if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| DlgError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Check dlgview.yaml syntax; mode must be 0 or 1".to_string()),
        })
    }

    /// Serialize to YAML for `dlgview init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| DlgError::Config {
            message: format!("Failed to serialize config: {}", e),
            help: None,
        })
    }

    /// Whether a file extension marks a descriptor.
    pub fn is_descriptor(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }
}

/// Simple glob matching: `*.ext`, `dir/*`, `**/dir/*`, or a substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        return match rest.strip_suffix("/*") {
            Some(dir) => path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir)),
            None => path.contains(rest),
        };
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }

    path.contains(pattern)
}
