//! The data root and its train/val/test splits.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{StageMode, DEFAULT_DATA_ROOT};
use crate::error::{Error, Result};
use crate::fs::{copy_tree, ensure_dir, entry_names, link_root, scan_images, Split};
use crate::fs::{StageOptions, StageReport};

/// Number of entry names reported per split in a summary.
pub const SAMPLE_NAME_COUNT: usize = 5;

/// Entry count and a few example names for one split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub count: usize,
    pub sample_names: Vec<String>,
}

/// Per-split summary of the data root. Always holds all three splits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataSummary(BTreeMap<Split, SplitSummary>);

impl DataSummary {
    pub fn get(&self, split: Split) -> Option<&SplitSummary> {
        self.0.get(&split)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Split, &SplitSummary)> {
        self.0.iter()
    }

    /// Total number of entries across all splits.
    pub fn total(&self) -> usize {
        self.0.values().map(|s| s.count).sum()
    }
}

/// A directory holding `train/`, `val/` and `test/` image splits.
///
/// [`new`](Self::new) only records paths. [`open`](Self::open) also makes
/// sure the split directories exist.
#[derive(Debug, Clone)]
pub struct DirectoryDataSource {
    root: PathBuf,
}

impl Default for DirectoryDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_ROOT)
    }
}

impl DirectoryDataSource {
    /// Create a source for `root` without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source for `root` and ensure its split layout.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let source = Self::new(root);
        source.ensure_layout()?;
        Ok(source)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn split_dir(&self, split: Split) -> PathBuf {
        split.dir_in(&self.root)
    }

    /// Create any missing split directories. Safe to call repeatedly.
    pub fn ensure_layout(&self) -> Result<()> {
        for split in Split::ALL {
            let dir = self.split_dir(split);
            if let Err(e) = dir.symlink_metadata() {
                if e.kind() == std::io::ErrorKind::NotFound {
                    tracing::warn!("Directory {} not found. Creating...", dir.display());
                }
            }
            ensure_dir(&dir)?;
        }
        Ok(())
    }

    /// Count the entries of each split, with up to five names in listing order.
    ///
    /// Missing or unreadable splits are reported as empty.
    pub fn summary(&self) -> DataSummary {
        let splits = Split::ALL
            .into_iter()
            .map(|split| {
                let dir = self.split_dir(split);
                let names = if dir.is_dir() {
                    entry_names(&dir).unwrap_or_else(|e| {
                        tracing::debug!("Could not list {}: {}", dir.display(), e);
                        Vec::new()
                    })
                } else {
                    Vec::new()
                };

                let summary = SplitSummary {
                    count: names.len(),
                    sample_names: names.into_iter().take(SAMPLE_NAME_COUNT).collect(),
                };
                (split, summary)
            })
            .collect();

        DataSummary(splits)
    }

    /// Sorted paths of the image files in `split`.
    pub fn list_images(&self, split: Split) -> Result<Vec<PathBuf>> {
        let dir = self.split_dir(split);

        if !dir.exists() {
            return Err(Error::not_found(dir));
        }
        if !dir.is_dir() {
            return Err(Error::NotADirectory { path: dir });
        }

        let images = scan_images(&dir)?;
        tracing::info!("Found {} images in {} split", images.len(), split);
        Ok(images)
    }

    /// Populate the root from `source`, copying when `copy` is set and
    /// linking otherwise.
    pub fn stage_from_external(&self, source: impl AsRef<Path>, copy: bool) -> Result<StageReport> {
        self.stage_with(source, &StageOptions::new(StageMode::from_copy_flag(copy)))
    }

    /// Populate the root from `source` using explicit options.
    pub fn stage_with(
        &self,
        source: impl AsRef<Path>,
        options: &StageOptions,
    ) -> Result<StageReport> {
        let source = source.as_ref();

        if !source.exists() {
            return Err(Error::not_found(source));
        }

        match options.mode {
            StageMode::Copy => {
                tracing::info!(
                    "Copying data from {} to {}",
                    source.display(),
                    self.root.display()
                );
                let report = copy_tree(source, &self.root, options)?;
                self.ensure_layout()?;
                tracing::info!(
                    "Copied {} file(s), skipped {} ({} on conflict)",
                    report.files_copied,
                    report.files_skipped,
                    options.on_conflict
                );
                Ok(report)
            }
            StageMode::Link => {
                tracing::info!(
                    "Creating symbolic link from {} to {}",
                    source.display(),
                    self.root.display()
                );
                let report = link_root(source, &self.root)?;
                for split in Split::ALL {
                    let dir = self.split_dir(split);
                    if !dir.is_dir() {
                        tracing::warn!("Linked data has no {} split at {}", split, dir.display());
                    }
                }
                Ok(report)
            }
        }
    }

    /// Report whether any split holds data, logging guidance when none does.
    pub fn check_availability(&self) -> bool {
        let summary = self.summary();
        let total = summary.total();

        if total == 0 {
            tracing::error!("No data found! Please set up your data directory.");
            tracing::info!("Run the following commands to set up data:");
            tracing::info!(
                "1. Create data directories: mkdir -p {}/{{train,val,test}}",
                self.root.display()
            );
            tracing::info!("2. Copy your data or create symbolic links");
            return false;
        }

        let counts: Vec<String> = summary
            .iter()
            .map(|(split, info)| format!("{}={}", split, info.count))
            .collect();
        tracing::info!("Data found: {} file(s) ({})", total, counts.join(", "));
        true
    }
}

/// Check whether the default `data` root holds any data.
pub fn check_data_availability() -> Result<bool> {
    check_data_availability_at(DEFAULT_DATA_ROOT)
}

/// Check whether `root` holds any data, creating its split layout first.
pub fn check_data_availability_at(root: impl Into<PathBuf>) -> Result<bool> {
    let source = DirectoryDataSource::open(root)?;
    Ok(source.check_availability())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` under a scoped subscriber and return what it logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_new_does_not_touch_filesystem() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");

        let source = DirectoryDataSource::new(&root);

        assert_eq!(source.root(), root);
        assert!(!root.exists());
    }

    #[test]
    fn test_open_creates_layout() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("x").join("data");

        let source = DirectoryDataSource::open(&root).unwrap();

        for split in ["train", "val", "test"] {
            assert!(root.join(split).is_dir());
        }

        let summary = source.summary();
        for split in Split::ALL {
            assert_eq!(summary.get(split), Some(&SplitSummary::default()));
        }
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_ensure_layout_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        touch(&source.split_dir(Split::Train).join("a.png"));

        source.ensure_layout().unwrap();
        DirectoryDataSource::open(source.root()).unwrap();

        assert!(source.split_dir(Split::Train).join("a.png").is_file());
    }

    #[test]
    fn test_summary_with_missing_root() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::new(tmp.path().join("missing"));

        let summary = source.summary();

        assert_eq!(summary.iter().count(), 3);
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_summary_counts_all_entries() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        let train = source.split_dir(Split::Train);
        for i in 0..7 {
            touch(&train.join(format!("img{}.png", i)));
        }
        touch(&source.split_dir(Split::Val).join("notes.txt"));

        let summary = source.summary();
        let train_summary = summary.get(Split::Train).unwrap();

        assert_eq!(train_summary.count, 7);
        let listed = entry_names(&train).unwrap();
        assert_eq!(train_summary.sample_names, listed[..SAMPLE_NAME_COUNT]);
        assert_eq!(summary.get(Split::Val).unwrap().count, 1);
        assert_eq!(summary.get(Split::Test).unwrap().count, 0);
        assert_eq!(summary.total(), 8);
    }

    #[test]
    fn test_summary_json_keys() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();

        let json = serde_json::to_value(source.summary()).unwrap();

        assert_eq!(json["train"]["count"], 0);
        assert!(json["val"]["sample_names"].as_array().unwrap().is_empty());
        assert!(json.get("test").is_some());
    }

    #[test]
    fn test_list_images_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        let train = source.split_dir(Split::Train);
        for name in ["img2.JPG", "notes.txt", "img1.png"] {
            touch(&train.join(name));
        }

        let images = source.list_images(Split::Train).unwrap();

        assert_eq!(names(&images), ["img1.png", "img2.JPG"]);
        assert_eq!(images, source.list_images(Split::Train).unwrap());
        assert!(images.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_list_images_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        let test = source.split_dir(Split::Test);
        touch(&test.join("A.JPG"));
        touch(&test.join("b.jpg"));
        touch(&test.join("c.Jpeg"));

        let images = source.list_images(Split::Test).unwrap();

        assert_eq!(names(&images), ["A.JPG", "b.jpg", "c.Jpeg"]);
    }

    #[test]
    fn test_list_images_missing_split() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::new(tmp.path().join("data"));

        let err = source.list_images(Split::Val).unwrap_err();

        assert!(matches!(err, Error::NotFound { path } if path.ends_with("val")));
    }

    #[test]
    fn test_list_images_logs_count() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        touch(&source.split_dir(Split::Val).join("a.png"));
        touch(&source.split_dir(Split::Val).join("b.bmp"));

        let logs = capture_logs(|| {
            source.list_images(Split::Val).unwrap();
        });

        assert!(logs.contains("Found 2 images in val split"));
    }

    #[test]
    fn test_ensure_layout_warns_only_for_missing_splits() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");
        fs::create_dir_all(root.join("train")).unwrap();

        let logs = capture_logs(|| {
            DirectoryDataSource::open(&root).unwrap();
        });

        assert!(!logs.contains("train not found"));
        assert!(logs.contains("val not found. Creating..."));
        assert!(logs.contains("test not found. Creating..."));
    }

    #[test]
    fn test_ensure_layout_file_in_place_of_split() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");
        fs::create_dir_all(&root).unwrap();
        touch(&root.join("train"));

        let mut result = None;
        let logs = capture_logs(|| {
            result = Some(DirectoryDataSource::open(&root));
        });

        assert!(matches!(result, Some(Err(Error::NotADirectory { .. }))));
        assert!(!logs.contains("not found"));
    }

    #[test]
    fn test_stage_missing_source() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();

        for copy in [true, false] {
            let err = source
                .stage_from_external(tmp.path().join("nowhere"), copy)
                .unwrap_err();
            assert!(matches!(err, Error::NotFound { .. }));
        }
        assert!(source.split_dir(Split::Train).is_dir());
    }

    #[test]
    fn test_stage_copy_keeps_layout() {
        let tmp = TempDir::new().unwrap();
        let external = tmp.path().join("external");
        fs::create_dir_all(external.join("train")).unwrap();
        touch(&external.join("train").join("cell.tiff"));
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();

        let report = source.stage_from_external(&external, true).unwrap();

        assert_eq!(report.mode, StageMode::Copy);
        assert_eq!(report.files_copied, 1);
        assert_eq!(names(&source.list_images(Split::Train).unwrap()), ["cell.tiff"]);
        assert!(source.split_dir(Split::Test).is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_stage_link_points_at_absolute_source() {
        let tmp = TempDir::new().unwrap();
        let external = tmp.path().join("external");
        fs::create_dir_all(external.join("val")).unwrap();
        touch(&external.join("val").join("a.png"));
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();

        let report = source.stage_from_external(&external, false).unwrap();

        assert_eq!(report.source, external);
        assert_eq!(fs::read_link(source.root()).unwrap(), external);
        assert_eq!(names(&source.list_images(Split::Val).unwrap()), ["a.png"]);
        assert!(matches!(
            source.list_images(Split::Train),
            Err(Error::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_stage_link_refuses_populated_root() {
        let tmp = TempDir::new().unwrap();
        let external = tmp.path().join("external");
        fs::create_dir_all(&external).unwrap();
        let source = DirectoryDataSource::open(tmp.path().join("data")).unwrap();
        touch(&source.split_dir(Split::Train).join("a.png"));

        let err = source.stage_from_external(&external, false).unwrap_err();

        assert!(matches!(err, Error::RootNotEmpty { .. }));
        assert_eq!(source.list_images(Split::Train).unwrap().len(), 1);
    }

    #[test]
    fn test_check_availability() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");

        assert!(!check_data_availability_at(&root).unwrap());

        touch(&root.join("test").join("anything.txt"));
        assert!(check_data_availability_at(&root).unwrap());
    }
}
