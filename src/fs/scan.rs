//! Image file discovery.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// File extensions recognised as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tiff", "bmp"];

/// Check whether a file name carries one of the image extensions.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// List the image files directly inside `dir`, sorted by full path.
///
/// Subdirectories are not descended into, and directories whose name
/// happens to end in an image extension are ignored.
pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !has_image_extension(&path) || !path.is_file() {
            continue;
        }

        images.push(path);
    }

    images.sort();
    Ok(images)
}

/// Names of the direct children of `dir`, in directory listing order.
pub fn entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}
