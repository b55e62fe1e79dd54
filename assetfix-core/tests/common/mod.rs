#![allow(dead_code)]

use assetfix_core::ports::Reporter;
use assetfix_types::{ChangeReport, FileChange, FileFailure, ToolInfo};

/// Collects reporter callbacks as plain lines.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub changed: Vec<String>,
    pub failed: Vec<String>,
    pub finished: bool,
}

impl Reporter for RecordingReporter {
    fn file_changed(&mut self, label: &str, change: &FileChange) -> anyhow::Result<()> {
        self.changed.push(format!("{label} {}", change.path));
        Ok(())
    }

    fn file_failed(&mut self, failure: &FileFailure) -> anyhow::Result<()> {
        self.failed.push(failure.path.to_string());
        Ok(())
    }

    fn finished(&mut self, _report: &ChangeReport) -> anyhow::Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// A reporter whose output stream has gone away.
#[derive(Debug, Default)]
pub struct ClosedReporter {
    pub attempts: usize,
}

impl Reporter for ClosedReporter {
    fn file_changed(&mut self, _label: &str, _change: &FileChange) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("broken pipe")
    }

    fn file_failed(&mut self, _failure: &FileFailure) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("broken pipe")
    }

    fn finished(&mut self, _report: &ChangeReport) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("broken pipe")
    }
}

pub fn tool() -> ToolInfo {
    ToolInfo {
        name: "assetfix".to_string(),
        version: Some("0.1.0".to_string()),
    }
}
