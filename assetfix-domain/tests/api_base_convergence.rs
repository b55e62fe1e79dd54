//! Every historical base-URL declaration converges to one expression.

use assetfix_domain::catalog::api_base;
use assetfix_domain::{ApiBaseProfile, RuleSet, rewrite};
use pretty_assertions::assert_eq;

const CANONICAL: &str = r#"const API_BASE = (window.location.port === "5500") ? "http://localhost:8080" : ((typeof window.API_BASE !== "undefined" && window.API_BASE !== "") ? window.API_BASE : "");"#;

fn catalog() -> RuleSet {
    api_base::catalog(&ApiBaseProfile::default()).expect("api-base catalog validates")
}

const VARIANTS: &[&str] = &[
    r#"const API_BASE = (typeof window.API_BASE !== "undefined") ? window.API_BASE : "";"#,
    r#"const API_BASE = (typeof window.API_BASE !== "undefined") ? window.API_BASE : (window.location.port === "5500" ? "http://localhost:8080" : "");"#,
    r#"const API_BASE = (typeof window !== "undefined" && typeof window.API_BASE !== "undefined") ? window.API_BASE : (window.location.port === "5500" ? "http://localhost:8080" : "");"#,
];

#[test]
fn historical_variants_converge() {
    let set = catalog();
    for variant in VARIANTS {
        let out = rewrite(variant, [&set]);
        assert_eq!(out.text, CANONICAL, "variant: {variant}");
        assert!(out.changed);
    }
}

#[test]
fn hardcoded_origin_converges_too() {
    let set = catalog();
    let out = rewrite(r#"const API_BASE = "https://pharma-track-app.onrender.com";"#, [&set]);
    assert_eq!(out.text, CANONICAL);
    assert_eq!(out.fired[0].rule_id, "api-base.hardcoded_origin");
}

#[test]
fn whitespace_and_quote_style_are_equivalent() {
    let set = catalog();
    let src = "const   API_BASE=(typeof window.API_BASE!=='undefined')\n    ? window.API_BASE\n    : '';";
    assert_eq!(rewrite(src, [&set]).text, CANONICAL);
}

#[test]
fn surrounding_code_is_untouched() {
    let set = catalog();
    let src = format!("(function () {{\n  {}\n  load();\n}})();\n", VARIANTS[1]);
    let out = rewrite(&src, [&set]);
    assert_eq!(out.text, format!("(function () {{\n  {CANONICAL}\n  load();\n}})();\n"));
}

#[test]
fn partial_expressions_do_not_fire() {
    let set = catalog();
    let partials = [
        // missing terminator
        r#"const API_BASE = (typeof window.API_BASE !== "undefined") ? window.API_BASE : """#,
        // different fallback origin
        r#"const API_BASE = (typeof window.API_BASE !== "undefined") ? window.API_BASE : (window.location.port === "5500" ? "http://localhost:9090" : "");"#,
        // different variable
        r#"const API_ROOT = (typeof window.API_ROOT !== "undefined") ? window.API_ROOT : "";"#,
        // mismatched quotes
        r#"const API_BASE = (typeof window.API_BASE !== "undefined') ? window.API_BASE : "";"#,
    ];
    for src in partials {
        let out = rewrite(src, [&set]);
        assert!(!out.changed, "should not fire: {src}");
        assert_eq!(out.text, src);
    }
}

#[test]
fn canonical_output_is_a_fixed_point() {
    let set = catalog();
    let out = rewrite(CANONICAL, [&set]);
    assert!(!out.changed);
    assert!(out.fired.is_empty());
}
