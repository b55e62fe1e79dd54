//! Port traits abstracting all I/O away from the pipeline.

use assetfix_edit::AssetError;
use assetfix_types::{ChangeReport, FileChange, FileFailure};
use camino::{Utf8Path, Utf8PathBuf};

/// A regular file found under the walk root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetEntry {
    /// Path as walked, i.e. prefixed with the root.
    pub path: Utf8PathBuf,
}

impl AssetEntry {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name().unwrap_or_default()
    }
}

/// Where assets live.
///
/// `walk` yields entries in a stable order. An `Err` item is a per-file
/// failure (unreadable directory, non-UTF-8 name) and never stops the walk.
pub trait AssetStore {
    fn is_dir(&self, path: &Utf8Path) -> bool;
    fn walk(&self, root: &Utf8Path) -> Vec<Result<AssetEntry, AssetError>>;
    fn read(&self, entry: &AssetEntry) -> Result<Vec<u8>, AssetError>;
    /// All or nothing: on error the stored contents are unchanged.
    fn write(&self, entry: &AssetEntry, contents: &str) -> Result<(), AssetError>;
}

/// Receives outcomes as the walk progresses.
pub trait Reporter {
    fn file_changed(&mut self, label: &str, change: &FileChange) -> anyhow::Result<()>;
    fn file_failed(&mut self, failure: &FileFailure) -> anyhow::Result<()>;
    fn finished(&mut self, report: &ChangeReport) -> anyhow::Result<()>;
}

/// File-system write operations for report artifacts.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
