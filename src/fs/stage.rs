//! Populating the data root from an external location.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{ConflictPolicy, StageMode, StagingConfig};
use crate::error::{Error, Result};
use crate::fs::layout::ensure_dir;
use crate::output::create_item_bar;

/// Options controlling a staging run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageOptions {
    pub mode: StageMode,
    pub on_conflict: ConflictPolicy,
    pub show_progress: bool,
}

impl StageOptions {
    /// Options for the given mode with default conflict handling and no progress bar.
    pub fn new(mode: StageMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}

impl From<&StagingConfig> for StageOptions {
    fn from(config: &StagingConfig) -> Self {
        Self {
            mode: config.mode,
            on_conflict: config.on_conflict,
            show_progress: config.show_progress,
        }
    }
}

/// Outcome of a staging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub mode: StageMode,
    /// Absolute form of the source path.
    pub source: PathBuf,
    pub root: PathBuf,
    pub files_copied: u64,
    pub files_skipped: u64,
    pub dirs_created: u64,
}

impl StageReport {
    fn new(mode: StageMode, source: PathBuf, root: &Path) -> Self {
        Self {
            mode,
            source,
            root: root.to_path_buf(),
            files_copied: 0,
            files_skipped: 0,
            dirs_created: 0,
        }
    }
}

/// Absolute form of `path`, without resolving symbolic links.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Ok(joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

/// Merge the directory tree at `source` into `root`.
///
/// Links inside `source` are followed so the result never points back
/// into the source. Existing files in `root` that have no counterpart in
/// `source` are left alone.
pub fn copy_tree(source: &Path, root: &Path, options: &StageOptions) -> Result<StageReport> {
    if !source.is_dir() {
        return Err(Error::NotADirectory {
            path: source.to_path_buf(),
        });
    }

    let mut report = StageReport::new(StageMode::Copy, absolute_path(source)?, root);

    // Validated against the link target while a linked root still exists.
    reject_overlap(source, root)?;

    // A root left behind by link staging must not be written through.
    if is_symlink(root) {
        tracing::info!("Removing existing link at {}", root.display());
        remove_link(root)?;
    }
    if ensure_dir(root)? {
        report.dirs_created += 1;
    }

    let entries = WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let file_count = entries.iter().filter(|e| !e.file_type().is_dir()).count() as u64;
    let bar = options
        .show_progress
        .then(|| create_item_bar(file_count, "Copying"));

    for entry in &entries {
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            Error::InvalidStaging(format!(
                "{} is outside of {}",
                entry.path().display(),
                source.display()
            ))
        })?;
        let dest = root.join(relative);

        if entry.file_type().is_dir() {
            if ensure_dir(&dest)? {
                report.dirs_created += 1;
            }
            continue;
        }

        if copy_file(entry.path(), &dest, options.on_conflict)? {
            report.files_copied += 1;
        } else {
            report.files_skipped += 1;
        }

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    Ok(report)
}

/// Copy one file, applying the conflict policy. Returns `false` if skipped.
fn copy_file(from: &Path, dest: &Path, policy: ConflictPolicy) -> Result<bool> {
    if let Ok(meta) = dest.symlink_metadata() {
        if meta.is_dir() {
            return Err(Error::StageConflict {
                path: dest.to_path_buf(),
            });
        }

        match policy {
            ConflictPolicy::Skip => {
                tracing::debug!("Skipping existing file: {}", dest.display());
                return Ok(false);
            }
            ConflictPolicy::Error => {
                return Err(Error::StageConflict {
                    path: dest.to_path_buf(),
                });
            }
            ConflictPolicy::Overwrite => {
                // Copying onto a link would write into its target.
                if meta.file_type().is_symlink() {
                    remove_link(dest)?;
                }
                tracing::debug!("Overwriting existing file: {}", dest.display());
            }
        }
    }

    fs::copy(from, dest)?;
    Ok(true)
}

/// Replace `root` with a symbolic link pointing at the absolute `source`.
///
/// An existing link or file at `root` is removed. An existing directory is
/// removed only when it holds nothing but empty directories; otherwise
/// `RootNotEmpty` is returned and nothing is touched. A root already
/// linked to `source` is left as is.
pub fn link_root(source: &Path, root: &Path) -> Result<StageReport> {
    let target = absolute_path(source)?;
    let report = StageReport::new(StageMode::Link, target.clone(), root);

    if is_symlink(root) && fs::read_link(root)? == target {
        tracing::info!("{} already links to {}", root.display(), target.display());
        return Ok(report);
    }

    // Checked before anything is removed, while a linked root still resolves.
    reject_overlap(source, root)?;

    match root.symlink_metadata() {
        Ok(meta) if meta.file_type().is_symlink() => {
            tracing::info!("Removing existing link at {}", root.display());
            remove_link(root)?;
        }
        Ok(meta) if meta.is_dir() => {
            if contains_files(root)? {
                return Err(Error::RootNotEmpty {
                    path: root.to_path_buf(),
                });
            }
            tracing::info!("Removing empty directory tree at {}", root.display());
            fs::remove_dir_all(root)?;
        }
        Ok(_) => {
            tracing::info!("Removing existing file at {}", root.display());
            fs::remove_file(root)?;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    create_symlink(&target, root)?;
    Ok(report)
}

/// Check whether anything other than a directory lives under `dir`.
fn contains_files(dir: &Path) -> Result<bool> {
    for entry in WalkDir::new(dir).min_depth(1) {
        if !entry?.file_type().is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Fail when `source` and `root` are the same directory or nested in each other.
///
/// Both paths are resolved through links, so a linked root is compared by
/// its target and a source reached through the root is caught.
fn reject_overlap(source: &Path, root: &Path) -> Result<()> {
    let source_real = resolve_path(source)?;
    let root_real = resolve_path(root)?;

    if source_real.starts_with(&root_real) || root_real.starts_with(&source_real) {
        return Err(Error::InvalidStaging(format!(
            "source {} and data root {} overlap",
            source.display(),
            root.display()
        )));
    }

    Ok(())
}

/// Canonical form of `path`; a missing tail is appended to its deepest
/// existing ancestor.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = absolute_path(path)?;

    for ancestor in absolute.ancestors() {
        if let Ok(real) = ancestor.canonicalize() {
            let rest = absolute.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(if rest.as_os_str().is_empty() {
                real
            } else {
                real.join(rest)
            });
        }
    }

    Ok(absolute)
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

fn remove_link(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if path.is_dir() {
            return fs::remove_dir(path);
        }
    }
    fs::remove_file(path)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
