//! The tree-walk rewrite pipeline, extracted from the CLI.
//!
//! This entry point is I/O-agnostic: every filesystem operation goes through
//! the port traits.

use crate::ports::{AssetEntry, AssetStore, Reporter, WritePort};
use crate::settings::RunSettings;
use anyhow::Context;
use assetfix_domain::{RewritePlan, rewrite_asset};
use assetfix_edit::{AssetError, decode_text, describe_change, render_patch};
use assetfix_render::render_report_md;
use assetfix_types::{ChangeReport, FileFailure, ToolInfo};
use camino::{Utf8Path, Utf8PathBuf};
use glob::Pattern;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Errors that abort a run. Per-file problems never do.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("asset root `{0}` is not a directory")]
    MissingRoot(Utf8PathBuf),
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Outcome of `TreeWalker::run`.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: ChangeReport,
    /// Unified diff of every change; empty unless `collect_patch` was set.
    pub patch: String,
}

/// Applies a [`RewritePlan`] to every candidate file under a root.
///
/// A file is a candidate when its name ends with an allowed suffix and its
/// root-relative path matches no exclude pattern. Each candidate is read,
/// decoded, rewritten in memory and persisted only if the text changed.
#[derive(Debug)]
pub struct TreeWalker {
    plan: RewritePlan,
    settings: RunSettings,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl TreeWalker {
    pub fn new(plan: RewritePlan, settings: RunSettings) -> Result<Self, ToolError> {
        let exclude = settings
            .exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ToolError::InvalidExclude {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let extensions = settings
            .extensions
            .clone()
            .unwrap_or_else(|| plan.extensions());

        Ok(Self {
            plan,
            settings,
            extensions,
            exclude,
        })
    }

    pub fn plan(&self) -> &RewritePlan {
        &self.plan
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Walk the tree once.
    ///
    /// Only a missing root aborts the run. Read, decode, write and walk
    /// failures are recorded against the file and the walk continues; a
    /// reporter that stops accepting lines is logged and otherwise ignored.
    pub fn run(
        &self,
        store: &dyn AssetStore,
        reporter: &mut dyn Reporter,
        tool: ToolInfo,
    ) -> Result<RunOutcome, ToolError> {
        let root = &self.settings.root;
        if !store.is_dir(root) {
            return Err(ToolError::MissingRoot(root.clone()));
        }

        info!(
            root = %root,
            rule_sets = self.plan.rule_sets.len(),
            dry_run = self.settings.dry_run,
            "starting walk"
        );

        let mut report = ChangeReport::new(tool, root.clone(), self.settings.dry_run);
        let mut before = BTreeMap::new();
        let mut after = BTreeMap::new();
        let mut sink = ReportSink::new(reporter);

        for item in store.walk(root) {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    if self.covers_failure(&err) {
                        self.fail(&mut report, &mut sink, err);
                    }
                    continue;
                }
            };
            if !self.is_candidate(&entry) {
                continue;
            }

            match self.process(store, &entry) {
                Ok(None) => {
                    debug!(path = %entry.path, "unchanged");
                    report.record_unchanged();
                }
                Ok(Some(done)) => {
                    sink.deliver(|r| r.file_changed(&done.label, &done.change));
                    report.record_change(done.change);
                    if self.settings.collect_patch {
                        before.insert(entry.path.clone(), done.before);
                        after.insert(entry.path, done.after);
                    }
                }
                Err(err) => self.fail(&mut report, &mut sink, err),
            }
        }

        report.finish();
        sink.deliver(|r| r.finished(&report));
        info!(
            scanned = report.summary.files_scanned,
            changed = report.summary.files_changed,
            errors = report.summary.errors,
            "walk finished"
        );

        let patch = if self.settings.collect_patch {
            render_patch(&before, &after)
        } else {
            String::new()
        };
        Ok(RunOutcome { report, patch })
    }

    fn is_candidate(&self, entry: &AssetEntry) -> bool {
        self.has_allowed_suffix(entry.file_name()) && !self.is_excluded(&entry.path)
    }

    /// Whether a walk failure concerns a path this run would have visited.
    ///
    /// A file with an undecodable name is filtered like any other file. A
    /// directory that could not be listed may hide candidates, so only the
    /// exclude patterns apply to it.
    fn covers_failure(&self, err: &AssetError) -> bool {
        let path = err.path();
        match err {
            AssetError::NonUtf8Path { .. } => {
                self.has_allowed_suffix(path.file_name().unwrap_or_default())
                    && !self.is_excluded(path)
            }
            _ => !self.is_excluded(path),
        }
    }

    fn has_allowed_suffix(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, path: &Utf8Path) -> bool {
        let rel = relative_to(path, &self.settings.root);
        if let Some(pattern) = self.exclude.iter().find(|p| p.matches(rel.as_str())) {
            debug!(path = %path, pattern = pattern.as_str(), "excluded");
            return true;
        }
        false
    }

    fn process(
        &self,
        store: &dyn AssetStore,
        entry: &AssetEntry,
    ) -> Result<Option<Processed>, AssetError> {
        let bytes = store.read(entry)?;
        let text = decode_text(&entry.path, bytes)?;

        let name = entry.file_name();
        let out = rewrite_asset(name, &text, self.plan.sets_for(name), &self.plan.fallbacks);
        if !out.changed {
            return Ok(None);
        }

        if !self.settings.dry_run {
            store.write(entry, &out.text)?;
        }

        let label = out.label().unwrap_or_default().to_string();
        let rule_set = out.rule_set().unwrap_or_default().to_string();
        let rules = out.fired.iter().map(|f| f.rule_id.clone()).collect();
        let change = describe_change(&entry.path, &rule_set, rules, &text, &out.text);

        Ok(Some(Processed {
            label,
            change,
            before: text,
            after: out.text,
        }))
    }

    fn fail(&self, report: &mut ChangeReport, sink: &mut ReportSink<'_>, err: AssetError) {
        warn!(path = %err.path(), error = %err, "skipping file");
        let failure = FileFailure {
            path: err.path().to_path_buf(),
            kind: err.kind(),
            message: err.to_string(),
        };
        sink.deliver(|r| r.file_failed(&failure));
        report.record_failure(failure);
    }
}

/// Forwards callbacks to the reporter. Failures never abort the walk; the
/// first one is logged.
struct ReportSink<'a> {
    reporter: &'a mut dyn Reporter,
    broken: bool,
}

impl<'a> ReportSink<'a> {
    fn new(reporter: &'a mut dyn Reporter) -> Self {
        Self {
            reporter,
            broken: false,
        }
    }

    fn deliver(&mut self, send: impl FnOnce(&mut dyn Reporter) -> anyhow::Result<()>) {
        if let Err(err) = send(&mut *self.reporter)
            && !self.broken
        {
            warn!(error = %err, "reporter failed; walk continues");
            self.broken = true;
        }
    }
}

struct Processed {
    label: String,
    change: assetfix_types::FileChange,
    before: String,
    after: String,
}

fn relative_to<'a>(path: &'a Utf8Path, root: &Utf8Path) -> &'a Utf8Path {
    path.strip_prefix(root).unwrap_or(path)
}

/// Write the JSON and markdown reports where requested.
pub fn write_report_artifacts(
    outcome: &RunOutcome,
    report_json: Option<&Utf8Path>,
    report_md: Option<&Utf8Path>,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    if let Some(path) = report_json {
        let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
        writer.write_file(path, json.as_bytes())?;
    }
    if let Some(path) = report_md {
        let md = render_report_md(&outcome.report);
        writer.write_file(path, md.as_bytes())?;
    }
    Ok(())
}
