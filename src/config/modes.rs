//! Staging mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an external dataset is brought under the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageMode {
    /// Replace the root with a symbolic link to the source (default).
    #[default]
    Link,
    /// Copy the source tree into the root.
    Copy,
}

impl StageMode {
    /// Map the boolean `copy` flag onto a mode.
    pub fn from_copy_flag(copy: bool) -> Self {
        if copy {
            StageMode::Copy
        } else {
            StageMode::Link
        }
    }
}

impl fmt::Display for StageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageMode::Link => write!(f, "link"),
            StageMode::Copy => write!(f, "copy"),
        }
    }
}

/// What copy staging does when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Replace the existing file (default).
    #[default]
    Overwrite,
    /// Keep the existing file.
    Skip,
    /// Abort staging.
    Error,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Overwrite => write!(f, "overwrite"),
            ConflictPolicy::Skip => write!(f, "skip"),
            ConflictPolicy::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(ConflictPolicy::Overwrite),
            "skip" => Ok(ConflictPolicy::Skip),
            "error" => Ok(ConflictPolicy::Error),
            _ => Err(format!(
                "Unknown conflict policy '{}' (expected overwrite, skip or error)",
                s
            )),
        }
    }
}
