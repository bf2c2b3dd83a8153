//! Filesystem module.
//!
//! Provides:
//! - Split layout and directory creation
//! - Image discovery by extension
//! - Staging by copy or symbolic link

pub mod layout;
pub mod scan;
pub mod stage;

pub use layout::{ensure_dir, Split};
pub use scan::{entry_names, has_image_extension, scan_images, IMAGE_EXTENSIONS};
pub use stage::{absolute_path, copy_tree, link_root, StageOptions, StageReport};
