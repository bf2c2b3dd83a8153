//! Configuration module for the dataset-stager.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Staging mode and conflict policy definitions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, DataConfig, StagingConfig, DEFAULT_CONFIG_FILE, DEFAULT_DATA_ROOT};
pub use modes::{ConflictPolicy, StageMode};
pub use validation::{validate_config, validate_root};
