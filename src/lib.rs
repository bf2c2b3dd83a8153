//! Dataset Stager - train/val/test image directory bootstrap and staging.
//!
//! This library prepares a local data root for a training pipeline.
//!
//! # Features
//!
//! - Create missing `train`, `val` and `test` split directories
//! - List image files by extension (jpg, jpeg, png, tiff, bmp; any case)
//! - Per-split counts with sample file names
//! - Stage data from an external location by copy or symbolic link
//! - Data availability check with setup guidance
//!
//! # Example
//!
//! ```no_run
//! use dataset_stager::{DirectoryDataSource, Split};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DirectoryDataSource::open("data")?;
//!     println!("{} entries", source.summary().total());
//!
//!     for image in source.list_images(Split::Train)? {
//!         println!("{}", image.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod output;
pub mod source;

// Re-exports for convenience
pub use config::{Config, ConflictPolicy, StageMode};
pub use error::{Error, Result};
pub use fs::{Split, StageOptions, StageReport, IMAGE_EXTENSIONS};
pub use source::{
    check_data_availability, check_data_availability_at, DataSummary, DirectoryDataSource,
    SplitSummary,
};
