//! The shipped rule catalogs.
//!
//! Catalogs are static data. The API-base catalogs are built from an
//! [`ApiBaseProfile`] so tests can supply their own origins; the binary only
//! ever uses [`ApiBaseProfile::default`].

pub mod api_base;
pub mod legacy_origin;
pub mod mojibake;

use crate::error::CatalogError;
use crate::fallback::InjectionFallback;
use crate::rules::RuleSet;
use std::fmt;
use std::str::FromStr;

/// Values baked into the canonical base-URL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseProfile {
    /// Name of the base-URL variable, e.g. `API_BASE`.
    pub variable: String,
    /// Port served by the local static dev server.
    pub dev_port: String,
    /// Backend origin used during local development.
    pub dev_origin: String,
    /// Absolute origin from a retired deployment.
    pub legacy_origin: String,
    /// Script that predates the base-URL variable entirely.
    pub legacy_script: String,
    /// Declaration that identifies the legacy script's endpoint table.
    pub legacy_marker: String,
}

impl Default for ApiBaseProfile {
    fn default() -> Self {
        Self {
            variable: "API_BASE".to_string(),
            dev_port: "5500".to_string(),
            dev_origin: "http://localhost:8080".to_string(),
            legacy_origin: "https://pharma-track-app.onrender.com".to_string(),
            legacy_script: "visit-report.js".to_string(),
            legacy_marker: "const API =".to_string(),
        }
    }
}

impl ApiBaseProfile {
    /// Dev origin on the dev port, else a non-empty global override, else
    /// same-origin.
    pub fn canonical_expression(&self) -> String {
        let v = &self.variable;
        format!(
            r#"(window.location.port === "{port}") ? "{origin}" : ((typeof window.{v} !== "undefined" && window.{v} !== "") ? window.{v} : "")"#,
            port = self.dev_port,
            origin = self.dev_origin,
        )
    }

    pub fn canonical_declaration(&self, keyword: &str) -> String {
        format!("{keyword} {} = {};", self.variable, self.canonical_expression())
    }
}

/// Identifies one shipped catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogId {
    Mojibake,
    ApiBase,
    LegacyOrigin,
}

impl CatalogId {
    pub const ALL: [CatalogId; 3] = [CatalogId::Mojibake, CatalogId::ApiBase, CatalogId::LegacyOrigin];

    pub fn name(self) -> &'static str {
        match self {
            CatalogId::Mojibake => mojibake::NAME,
            CatalogId::ApiBase => api_base::NAME,
            CatalogId::LegacyOrigin => legacy_origin::NAME,
        }
    }

    pub fn build(self, profile: &ApiBaseProfile) -> Result<RuleSet, CatalogError> {
        match self {
            CatalogId::Mojibake => mojibake::catalog(),
            CatalogId::ApiBase => api_base::catalog(profile),
            CatalogId::LegacyOrigin => legacy_origin::catalog(profile),
        }
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown catalog `{s}`"))
    }
}

/// The rule sets and fallbacks one walk applies, in order.
#[derive(Debug, Clone, Default)]
pub struct RewritePlan {
    pub rule_sets: Vec<RuleSet>,
    pub fallbacks: Vec<InjectionFallback>,
}

impl RewritePlan {
    pub fn new(rule_sets: Vec<RuleSet>, fallbacks: Vec<InjectionFallback>) -> Self {
        Self {
            rule_sets,
            fallbacks,
        }
    }

    /// Build the shipped catalogs in the order given. Selecting `api-base`
    /// also enables its injection fallback.
    pub fn for_catalogs(ids: &[CatalogId], profile: &ApiBaseProfile) -> Result<Self, CatalogError> {
        let mut plan = Self::default();
        for id in ids {
            plan.rule_sets.push(id.build(profile)?);
            if *id == CatalogId::ApiBase {
                plan.fallbacks.push(api_base::injection_fallback(profile));
            }
        }
        Ok(plan)
    }

    /// Union of the rule sets' extension scopes, sorted and deduplicated.
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self
            .rule_sets
            .iter()
            .flat_map(|s| s.extensions().iter().cloned())
            .collect();
        exts.sort();
        exts.dedup();
        exts
    }

    /// Rule sets whose scope covers `file_name`.
    pub fn sets_for<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a RuleSet> + 'a {
        self.rule_sets.iter().filter(move |s| s.applies_to(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_expression_for_default_profile() {
        assert_eq!(
            ApiBaseProfile::default().canonical_declaration("const"),
            r#"const API_BASE = (window.location.port === "5500") ? "http://localhost:8080" : ((typeof window.API_BASE !== "undefined" && window.API_BASE !== "") ? window.API_BASE : "");"#
        );
    }

    #[test]
    fn catalog_ids_round_trip_through_names() {
        for id in CatalogId::ALL {
            assert_eq!(id.name().parse::<CatalogId>(), Ok(id));
        }
        assert!("nope".parse::<CatalogId>().is_err());
    }

    #[test]
    fn api_base_brings_its_fallback() {
        let profile = ApiBaseProfile::default();
        let plan = RewritePlan::for_catalogs(&[CatalogId::Mojibake], &profile).expect("plan");
        assert!(plan.fallbacks.is_empty());

        let plan = RewritePlan::for_catalogs(&CatalogId::ALL, &profile).expect("plan");
        assert_eq!(plan.rule_sets.len(), 3);
        assert_eq!(plan.fallbacks.len(), 1);
        assert_eq!(plan.extensions(), vec![".css", ".html", ".js"]);
    }

    #[test]
    fn sets_for_filters_by_scope() {
        let plan = RewritePlan::for_catalogs(&CatalogId::ALL, &ApiBaseProfile::default()).expect("plan");
        let names: Vec<&str> = plan.sets_for("style.css").map(|s| s.name()).collect();
        assert_eq!(names, vec!["mojibake"]);
        let names: Vec<&str> = plan.sets_for("app.js").map(|s| s.name()).collect();
        assert_eq!(names, vec!["mojibake", "api-base", "legacy-origin"]);
    }
}
