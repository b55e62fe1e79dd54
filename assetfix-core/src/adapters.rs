//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{AssetEntry, AssetStore, Reporter, WritePort};
use anyhow::Context;
use assetfix_edit::AssetError;
use assetfix_render::{changed_line, error_line, summary_line};
use assetfix_types::{ChangeReport, FileChange, FileFailure};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use tracing::debug;
use walkdir::WalkDir;

/// Assets on the local filesystem.
///
/// Entries are sorted by file name within each directory and symlinks are
/// not followed, so a walk is stable and never leaves the root.
#[derive(Debug, Clone, Default)]
pub struct FsAssetStore;

impl AssetStore for FsAssetStore {
    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn walk(&self, root: &Utf8Path) -> Vec<Result<AssetEntry, AssetError>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
                        .unwrap_or_else(|| root.to_path_buf());
                    out.push(Err(AssetError::Walk {
                        path,
                        message: err.to_string(),
                    }));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => out.push(Ok(AssetEntry::new(path))),
                Err(path) => out.push(Err(AssetError::NonUtf8Path {
                    path: Utf8PathBuf::from(path.to_string_lossy().into_owned()),
                })),
            }
        }
        out
    }

    fn read(&self, entry: &AssetEntry) -> Result<Vec<u8>, AssetError> {
        assetfix_edit::read_bytes(&entry.path)
    }

    fn write(&self, entry: &AssetEntry, contents: &str) -> Result<(), AssetError> {
        assetfix_edit::write_atomic(&entry.path, contents)
    }
}

/// In-memory asset store for embedding and testing.
///
/// Writes to paths registered with [`fail_writes_to`](Self::fail_writes_to)
/// fail without touching the stored bytes.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    files: RefCell<BTreeMap<Utf8PathBuf, Vec<u8>>>,
    failing_writes: BTreeSet<Utf8PathBuf>,
    writes: RefCell<Vec<Utf8PathBuf>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    pub fn fail_writes_to(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.failing_writes.insert(path.into());
        self
    }

    pub fn contents(&self, path: &Utf8Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn text(&self, path: &Utf8Path) -> Option<String> {
        self.contents(path).and_then(|b| String::from_utf8(b).ok())
    }

    /// Paths successfully written, in order.
    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes.borrow().clone()
    }
}

impl AssetStore for InMemoryAssetStore {
    fn is_dir(&self, path: &Utf8Path) -> bool {
        self.files
            .borrow()
            .keys()
            .any(|p| p != path && p.starts_with(path))
    }

    fn walk(&self, root: &Utf8Path) -> Vec<Result<AssetEntry, AssetError>> {
        self.files
            .borrow()
            .keys()
            .filter(|p| p.starts_with(root))
            .map(|p| Ok(AssetEntry::new(p.clone())))
            .collect()
    }

    fn read(&self, entry: &AssetEntry) -> Result<Vec<u8>, AssetError> {
        self.contents(&entry.path).ok_or_else(|| AssetError::Read {
            path: entry.path.clone(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such asset"),
        })
    }

    fn write(&self, entry: &AssetEntry, contents: &str) -> Result<(), AssetError> {
        if self.failing_writes.contains(&entry.path) {
            return Err(AssetError::Write {
                path: entry.path.clone(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only asset"),
            });
        }
        self.files
            .borrow_mut()
            .insert(entry.path.clone(), contents.as_bytes().to_vec());
        self.writes.borrow_mut().push(entry.path.clone());
        Ok(())
    }
}

/// Prints one line per changed or failed file, then the summary line.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn file_changed(&mut self, label: &str, change: &FileChange) -> anyhow::Result<()> {
        writeln!(self.out, "{}", changed_line(label, &change.path)).context("write report line")
    }

    fn file_failed(&mut self, failure: &FileFailure) -> anyhow::Result<()> {
        writeln!(self.out, "{}", error_line(&failure.path, &failure.message))
            .context("write report line")
    }

    fn finished(&mut self, report: &ChangeReport) -> anyhow::Result<()> {
        writeln!(self.out, "\n{}", summary_line(report)).context("write summary")?;
        self.out.flush().context("flush report")
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("create parent dir for {}", path))?;
        }
        debug!(path = %path, bytes = contents.len(), "writing artifact");
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
