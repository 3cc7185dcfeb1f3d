use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fillgap.toml";

/// Settings for `fillgap run`, read from `fillgap.toml`.
///
/// Relative directories are resolved against the directory holding the
/// config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillgapConfig {
    /// Directory holding the complete source documents.
    pub source_dir: PathBuf,
    /// Directory holding the partially translated documents.
    pub target_dir: PathBuf,
    /// Documents to process. Empty means every `*.json` under `source_dir`.
    pub files: Vec<String>,
    /// Take a timestamped backup before overwriting a target.
    pub backup: bool,
}

impl Default for FillgapConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("json2"),
            target_dir: PathBuf::from("json2_no"),
            files: Vec::new(),
            backup: true,
        }
    }
}

impl FillgapConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load `explicit` if given; otherwise load [`DEFAULT_CONFIG_FILE`] if it
    /// exists, falling back to defaults.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn relative_to(mut self, base: &Path) -> Self {
        if self.source_dir.is_relative() {
            self.source_dir = base.join(&self.source_dir);
        }
        if self.target_dir.is_relative() {
            self.target_dir = base.join(&self.target_dir);
        }
        self
    }
}
