//! Configuration validation logic.

use std::path::{Component, Path};

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_root(config.data_root())?;

    Ok(())
}

/// Validate the data root path.
///
/// The root may be replaced by a symbolic link during staging, so the
/// filesystem root and empty paths are rejected.
pub fn validate_root(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            field: "data.root".to_string(),
            message: "Data root cannot be empty".to_string(),
        });
    }

    let only_root = root
        .components()
        .all(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
    if only_root {
        return Err(Error::ConfigValidation {
            field: "data.root".to_string(),
            message: format!(
                "Data root cannot be the filesystem root: '{}'",
                root.display()
            ),
        });
    }

    if root.components().last() == Some(Component::ParentDir) {
        return Err(Error::ConfigValidation {
            field: "data.root".to_string(),
            message: format!(
                "Data root must name a directory, not a parent reference: '{}'",
                root.display()
            ),
        });
    }

    Ok(())
}
