//! Strips the retired absolute origin from scripts.
//!
//! Byte-exact literals: hardcoded declarations become the empty string
//! (same-origin requests) and absolute API URLs become relative ones.

use super::ApiBaseProfile;
use crate::error::CatalogError;
use crate::matcher::{Matcher, Replacement};
use crate::rules::{Rule, RuleSet};

pub const NAME: &str = "legacy-origin";
pub const LABEL: &str = "Fixed:";
pub const EXTENSIONS: &[&str] = &[".js"];

pub fn catalog(profile: &ApiBaseProfile) -> Result<RuleSet, CatalogError> {
    let v = &profile.variable;
    let o = &profile.legacy_origin;

    let mut rules = Vec::new();
    for keyword in ["const", "let"] {
        for (style, q) in [("double", '"'), ("single", '\'')] {
            rules.push(Rule::new(
                format!("legacy-origin.{keyword}_{style}_quoted"),
                Matcher::literal(format!("{keyword} {v} = {q}{o}{q};")),
                Replacement::Literal(format!("{keyword} {v} = \"\";")),
            )?);
        }
    }
    rules.push(Rule::new(
        "legacy-origin.api_prefix",
        Matcher::literal(format!("{o}/api")),
        Replacement::Literal("/api".to_string()),
    )?);

    RuleSet::new(NAME, LABEL, EXTENSIONS.iter().copied(), rules)
}
