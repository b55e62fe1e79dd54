//! API-base canonicalization catalog.
//!
//! Every historical way the scripts declared their base URL is rewritten to
//! the one canonical declaration. Matchers are bounded patterns: whitespace
//! between tokens and the quote style of string literals may vary, the
//! token sequence may not. The declaration keyword is kept.

use super::ApiBaseProfile;
use crate::error::CatalogError;
use crate::fallback::{EndpointRewrite, InjectionFallback};
use crate::matcher::{Matcher, Replacement};
use crate::rules::{Rule, RuleSet};

pub const NAME: &str = "api-base";
pub const LABEL: &str = "Updated";
pub const EXTENSIONS: &[&str] = &[".js"];

pub const INJECTION_NAME: &str = "api-base.injection";
pub const INJECTION_LABEL: &str = "Injected and Updated";

/// A string literal in either quote style.
fn quoted(value: &str) -> String {
    let v = regex::escape(value);
    format!(r#"(?:"{v}"|'{v}')"#)
}

const EMPTY: &str = r#"(?:""|'')"#;

pub fn catalog(profile: &ApiBaseProfile) -> Result<RuleSet, CatalogError> {
    let v = regex::escape(&profile.variable);
    let decl = format!(r"\b(?P<kw>const|let|var)\s+{v}\s*=\s*");
    let undef = quoted("undefined");
    let port = quoted(&profile.dev_port);
    let dev = quoted(&profile.dev_origin);
    let dev_fallback = format!(
        r"\(\s*window\.location\.port\s*===\s*{port}\s*\?\s*{dev}\s*:\s*{EMPTY}\s*\)"
    );
    let origin = regex::escape(&profile.legacy_origin);
    let legacy = format!(r#"(?:"{origin}/?"|'{origin}/?')"#);

    let patterns = [
        (
            "api-base.override_only",
            format!(r"{decl}\(\s*typeof\s+window\.{v}\s*!==\s*{undef}\s*\)\s*\?\s*window\.{v}\s*:\s*{EMPTY}\s*;"),
        ),
        (
            "api-base.override_then_dev",
            format!(r"{decl}\(\s*typeof\s+window\.{v}\s*!==\s*{undef}\s*\)\s*\?\s*window\.{v}\s*:\s*{dev_fallback}\s*;"),
        ),
        (
            "api-base.guarded_override_then_dev",
            format!(
                r"{decl}\(\s*typeof\s+window\s*!==\s*{undef}\s*&&\s*typeof\s+window\.{v}\s*!==\s*{undef}\s*\)\s*\?\s*window\.{v}\s*:\s*{dev_fallback}\s*;"
            ),
        ),
        ("api-base.hardcoded_origin", format!(r"{decl}{legacy}\s*;")),
    ];

    // `$` is the template sigil; the canonical text must come through as-is.
    let template = format!(
        "${{kw}} {} = {};",
        profile.variable.replace('$', "$$"),
        profile.canonical_expression().replace('$', "$$")
    );

    let rules = patterns
        .into_iter()
        .map(|(id, source)| {
            Rule::new(
                id,
                Matcher::pattern(id, &source)?,
                Replacement::Template(template.clone()),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    RuleSet::new(NAME, LABEL, EXTENSIONS.iter().copied(), rules)
}

/// Injects the canonical declaration into the legacy script and prefixes its
/// known relative endpoints.
pub fn injection_fallback(profile: &ApiBaseProfile) -> InjectionFallback {
    let v = &profile.variable;
    let endpoint = |from: &str, path: &str, wrap: fn(String) -> String| EndpointRewrite {
        from: from.to_string(),
        to: wrap(format!("`${{{v}}}{path}`")),
    };

    let endpoints = vec![
        endpoint("DCRS: '/api/dcrs'", "/api/dcrs", |t| format!("DCRS: {t}")),
        endpoint("MR_STOCK: '/api/mr-stock'", "/api/mr-stock", |t| format!("MR_STOCK: {t}")),
        endpoint("await apiJson(`/api/doctors`)", "/api/doctors", |t| format!("await apiJson({t})")),
        endpoint("await apiJson('/api/products')", "/api/products", |t| format!("await apiJson({t})")),
    ];

    InjectionFallback::new(
        INJECTION_NAME,
        INJECTION_LABEL,
        profile.legacy_script.clone(),
        profile.legacy_marker.clone(),
        profile.variable.clone(),
        profile.canonical_declaration("const"),
        endpoints,
    )
    .owned_by(NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::rewrite;

    fn canonical() -> String {
        ApiBaseProfile::default().canonical_declaration("const")
    }

    #[test]
    fn keyword_is_preserved() {
        let set = catalog(&ApiBaseProfile::default()).expect("catalog");
        let out = rewrite(r#"let API_BASE = "https://pharma-track-app.onrender.com";"#, [&set]);
        assert_eq!(out.text, ApiBaseProfile::default().canonical_declaration("let"));
    }

    #[test]
    fn trailing_slash_origin_is_recognised() {
        let set = catalog(&ApiBaseProfile::default()).expect("catalog");
        let out = rewrite("const API_BASE = 'https://pharma-track-app.onrender.com/';", [&set]);
        assert_eq!(out.text, canonical());
    }

    #[test]
    fn identifier_suffix_does_not_match() {
        let set = catalog(&ApiBaseProfile::default()).expect("catalog");
        let src = r#"const API_BASE_V2 = "https://pharma-track-app.onrender.com";"#;
        assert!(!rewrite(src, [&set]).changed);
    }

    #[test]
    fn dollar_in_profile_survives_template() {
        let profile = ApiBaseProfile {
            variable: "$API".to_string(),
            ..ApiBaseProfile::default()
        };
        let set = catalog(&profile).expect("catalog");
        let src = r#"const $API = "https://pharma-track-app.onrender.com";"#;
        let out = rewrite(src, [&set]);
        assert_eq!(out.text, profile.canonical_declaration("const"));
    }

    #[test]
    fn injection_endpoints_use_template_literals() {
        let fb = injection_fallback(&ApiBaseProfile::default());
        assert_eq!(fb.owner(), Some(NAME));
        let to: Vec<&str> = fb.endpoints().iter().map(|e| e.to.as_str()).collect();
        assert_eq!(
            to,
            vec![
                "DCRS: `${API_BASE}/api/dcrs`",
                "MR_STOCK: `${API_BASE}/api/mr-stock`",
                "await apiJson(`${API_BASE}/api/doctors`)",
                "await apiJson(`${API_BASE}/api/products`)",
            ]
        );
    }
}
