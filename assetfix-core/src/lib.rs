//! Embeddable core library for assetfix.
//!
//! Provides a clap-free, I/O-abstracted entry point for rewriting a tree of
//! static assets.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`AssetStore`](ports::AssetStore) enumerates, reads and persists assets
//! - [`Reporter`](ports::Reporter) receives per-file outcomes as they happen
//! - [`WritePort`](ports::WritePort) writes report artifacts
//!
//! The [`adapters`] module provides filesystem-backed and in-memory
//! implementations.
//!
//! # Entry point
//!
//! [`TreeWalker::run`](pipeline::TreeWalker::run) walks the tree once and
//! returns the change report.

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the domain types callers need to build a walker.
pub use assetfix_domain::{ApiBaseProfile, CatalogId, RewritePlan};
pub use pipeline::{RunOutcome, ToolError, TreeWalker, write_report_artifacts};
pub use settings::RunSettings;
