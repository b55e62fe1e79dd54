//! Catalog construction errors.
//!
//! These are raised while building a `RuleSet`, never while rewriting text:
//! a catalog that builds is safe to apply to any input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("rule `{rule}`: invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule `{rule}`: matcher accepts the empty string")]
    EmptyMatcher { rule: String },

    #[error("rule `{rule}`: literal matchers take literal replacements, not templates")]
    TemplateOnLiteral { rule: String },

    #[error("rule set `{set}`: duplicate rule id `{rule}`")]
    DuplicateRuleId { set: String, rule: String },

    #[error("rule set `{set}`: rules `{first}` and `{second}` share a matcher")]
    DuplicateMatcher {
        set: String,
        first: String,
        second: String,
    },

    /// An earlier matcher fires inside a later, longer one and would consume
    /// part of its span first.
    #[error("rule set `{set}`: `{earlier}` matches inside `{later}` and must come after it")]
    ShadowedMatcher {
        set: String,
        earlier: String,
        later: String,
    },

    /// A replacement that some matcher of the same set accepts breaks the
    /// fixed point: a second pass would rewrite it again.
    #[error("rule set `{set}`: replacement of `{rule}` is matched by `{matcher}`")]
    ReplacementRematches {
        set: String,
        rule: String,
        matcher: String,
    },
}
