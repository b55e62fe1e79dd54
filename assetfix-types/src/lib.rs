//! Shared DTOs (schemas-as-code) for the assetfix workspace.
//!
//! # Design constraints
//! - These types are serialized to disk as run reports.
//! - Prefer adding optional fields over changing semantics.

pub mod report;

pub use report::{
    ChangeReport, FailureKind, FileChange, FileFailure, RunInfo, RunSummary, ToolInfo,
};

/// Schema identifiers.
pub mod schema {
    pub const ASSETFIX_REPORT_V1: &str = "assetfix.report.v1";
}
