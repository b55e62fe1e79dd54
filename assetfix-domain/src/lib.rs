//! Domain logic: ordered text substitution rules and the catalogs built on
//! them.
//!
//! This crate owns *what* gets rewritten. It performs no I/O; walking the
//! tree and persisting results is `assetfix-core`'s job.

pub mod catalog;
mod error;
mod fallback;
mod matcher;
mod rewriter;
mod rules;

pub use catalog::{ApiBaseProfile, CatalogId, RewritePlan};
pub use error::CatalogError;
pub use fallback::{EndpointRewrite, InjectionFallback};
pub use matcher::{Matcher, Replacement};
pub use rewriter::{FiredRule, Rewrite, rewrite, rewrite_asset};
pub use rules::{Rule, RuleSet};
