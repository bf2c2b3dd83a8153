//! Error types for the dataset-stager application.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Layout errors
    #[error("Data directory {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Expected a directory at {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Unknown split '{0}' (expected train, val or test)")]
    InvalidSplit(String),

    // Staging errors
    #[error("Refusing to replace {} with a link: directory contains files", .path.display())]
    RootNotEmpty { path: PathBuf },

    #[error("Destination file already exists: {}", .path.display())]
    StageConflict { path: PathBuf },

    #[error("Invalid staging request: {0}")]
    InvalidStaging(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a `NotFound` error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound { path: path.into() }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const NO_DATA: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const STAGING_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
