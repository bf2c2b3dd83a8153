//! Configuration structures and loading logic.

use crate::config::modes::{ConflictPolicy, StageMode};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default data root, relative to the working directory.
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "dataset-stager.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub staging: StagingConfig,
}

/// Data root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the train/val/test splits.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

/// Staging options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Default staging mode (link or copy).
    #[serde(default)]
    pub mode: StageMode,

    /// What to do with files that already exist when copying.
    #[serde(default)]
    pub on_conflict: ConflictPolicy,

    /// Whether to show a progress bar while copying.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            mode: StageMode::default(),
            on_conflict: ConflictPolicy::default(),
            show_progress: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_ROOT)
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration if the file exists, otherwise fall back to defaults.
    ///
    /// The boolean is `true` when the file was actually read.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            Ok((Self::load(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the configured data root.
    pub fn data_root(&self) -> &Path {
        &self.data.root
    }
}
