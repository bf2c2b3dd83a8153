//! Split definitions and directory layout management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three fixed data partitions under the data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// All splits, in layout order.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Directory name of the split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }

    /// Path of the split directory under `root`.
    pub fn dir_in(&self, root: &Path) -> PathBuf {
        root.join(self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            _ => Err(Error::InvalidSplit(s.to_string())),
        }
    }
}

/// Ensure a directory exists, creating it and its parents if necessary.
///
/// Returns `true` when the directory had to be created.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    // Something other than a directory (or a dangling link) sits here.
    if path.symlink_metadata().is_ok() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    std::fs::create_dir_all(path)?;
    Ok(true)
}
