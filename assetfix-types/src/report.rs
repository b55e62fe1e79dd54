use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The result of one walk over an asset tree.
///
/// Built fresh for every run and never read back: a second run re-derives
/// everything from the files on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub root: Utf8PathBuf,

    /// True when nothing was written to disk.
    #[serde(default)]
    pub dry_run: bool,

    pub summary: RunSummary,

    /// Changed files, in walk order.
    #[serde(default)]
    pub changes: Vec<FileChange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl ChangeReport {
    pub fn new(tool: ToolInfo, root: Utf8PathBuf, dry_run: bool) -> Self {
        Self {
            schema: crate::schema::ASSETFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::start(),
            root,
            dry_run,
            summary: RunSummary::default(),
            changes: vec![],
            failures: vec![],
        }
    }

    pub fn record_unchanged(&mut self) {
        self.summary.files_scanned += 1;
        self.summary.files_unchanged += 1;
    }

    pub fn record_change(&mut self, change: FileChange) {
        self.summary.files_scanned += 1;
        self.summary.files_changed += 1;
        self.changes.push(change);
    }

    pub fn record_failure(&mut self, failure: FileFailure) {
        self.summary.files_scanned += 1;
        self.summary.errors += 1;
        self.failures.push(failure);
    }

    pub fn finish(&mut self) {
        self.run.ended_at = Some(Utc::now());
    }

    pub fn changed_paths(&self) -> Vec<&Utf8PathBuf> {
        self.changes.iter().map(|c| &c.path).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl RunInfo {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}

/// Counts for a run. `files_scanned` counts every candidate file the walker
/// attempted, including the ones that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_scanned: u64,
    pub files_changed: u64,
    pub files_unchanged: u64,
    pub errors: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: Utf8PathBuf,

    /// Name of the first rule set (or fallback) that changed the file.
    pub rule_set: String,

    /// Ids of every rule that fired, in application order.
    #[serde(default)]
    pub rules: Vec<String>,

    pub sha256_before: String,
    pub sha256_after: String,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: Utf8PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Read,
    Decode,
    Write,
    Walk,
}
