//! Rendering helpers for human-readable output.
//!
//! The console lines keep the exact shapes operators already grep for
//! (`Cleaned: <path>`, `Updated <path>`, `Error processing <path>: ...`).

use assetfix_types::{ChangeReport, FailureKind};
use camino::Utf8Path;

/// `<label> <path>`, e.g. `Cleaned: css/site.css` or `Updated js/app.js`.
pub fn changed_line(label: &str, path: &Utf8Path) -> String {
    format!("{label} {path}")
}

pub fn error_line(path: &Utf8Path, message: &str) -> String {
    format!("Error processing {path}: {message}")
}

pub fn summary_line(report: &ChangeReport) -> String {
    let mut line = format!("Total files changed: {}", report.summary.files_changed);
    if report.dry_run {
        line.push_str(" (dry run, nothing written)");
    }
    line
}

pub fn render_report_md(report: &ChangeReport) -> String {
    let mut out = String::new();
    out.push_str("# assetfix report\n\n");
    out.push_str(&format!("- Root: `{}`\n", report.root));
    out.push_str(&format!("- Run: `{}`\n", report.run.run_id));
    if report.dry_run {
        out.push_str("- Mode: dry run\n");
    }
    out.push_str(&format!(
        "- Files: {} scanned, {} changed, {} unchanged, {} errors\n\n",
        report.summary.files_scanned,
        report.summary.files_changed,
        report.summary.files_unchanged,
        report.summary.errors
    ));

    out.push_str("## Changes\n\n");
    if report.changes.is_empty() {
        out.push_str("_No files changed._\n");
    } else {
        out.push_str("| Path | Rule set | Rules | Bytes |\n");
        out.push_str("|---|---|---|---|\n");
        for change in &report.changes {
            out.push_str(&format!(
                "| `{}` | `{}` | {} | {} -> {} |\n",
                change.path,
                change.rule_set,
                change.rules.len(),
                change.bytes_before,
                change.bytes_after
            ));
        }
    }

    if !report.failures.is_empty() {
        out.push_str("\n## Errors\n\n");
        for failure in &report.failures {
            out.push_str(&format!(
                "- `{}` ({}): {}\n",
                failure.path,
                kind_label(failure.kind),
                failure.message
            ));
        }
    }

    out
}

fn kind_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Read => "read",
        FailureKind::Decode => "decode",
        FailureKind::Write => "write",
        FailureKind::Walk => "walk",
    }
}
