//! Nested corruption is consumed by the longest matcher, never split by a
//! shorter one that happens to sit inside it.

use assetfix_domain::catalog::mojibake;
use assetfix_domain::{CatalogError, Matcher, Replacement, Rule, RuleSet, rewrite};
use pretty_assertions::assert_eq;

fn catalog() -> RuleSet {
    mojibake::catalog().expect("mojibake catalog validates")
}

fn matcher_of(id: &str) -> String {
    mojibake::RULES
        .iter()
        .find(|(rule, _, _)| *rule == id)
        .map(|(_, from, _)| (*from).to_string())
        .expect("rule exists")
}

#[test]
fn triple_encoded_rupee_becomes_one_glyph() {
    let set = catalog();
    let src = format!("<td>{} 250</td>", matcher_of("mojibake.rupee_triple"));
    let out = rewrite(&src, [&set]);

    assert_eq!(out.text, "<td>₹ 250</td>");
    assert_eq!(out.fired.len(), 1);
    assert_eq!(out.fired[0].rule_id, "mojibake.rupee_triple");
}

#[test]
fn embedded_short_sequences_do_not_survive() {
    let set = catalog();
    let euro = matcher_of("mojibake.euro_double");
    for id in ["mojibake.rupee_triple", "mojibake.em_dash_triple", "mojibake.quote_marks_quad"] {
        let long = matcher_of(id);
        assert!(long.contains(&euro), "{id} should embed the euro sequence");

        let out = rewrite(&format!("a {long} b"), [&set]);
        assert!(!out.text.contains(&euro), "{id}: {:?}", out.text);
        assert!(out.fired.iter().all(|f| f.rule_id != "mojibake.euro_double"));
    }
}

#[test]
fn every_matcher_is_checked_against_later_entries() {
    // No earlier literal may occur inside a later one.
    for (i, (earlier, short, _)) in mojibake::RULES.iter().enumerate() {
        for (later, long, _) in &mojibake::RULES[i + 1..] {
            assert!(!long.contains(short), "{earlier} shadows {later}");
        }
    }
}

#[test]
fn out_of_order_catalog_is_rejected() {
    let short = Rule::new("short", Matcher::literal("â‚¬"), Replacement::Literal("€".into()))
        .expect("rule");
    let long = Rule::new("long", Matcher::literal("â‚¹"), Replacement::Literal("₹".into()))
        .expect("rule");
    let nested = Rule::new(
        "nested",
        Matcher::literal("Ã¢â‚¬â€"),
        Replacement::Literal("—".into()),
    )
    .expect("rule");

    let err = RuleSet::new("bad", "Cleaned:", [".js"], vec![short, long, nested])
        .expect_err("short before nested must fail");
    assert!(matches!(
        err,
        CatalogError::ShadowedMatcher { ref earlier, ref later, .. }
            if earlier == "short" && later == "nested"
    ));
}

#[test]
fn mixed_corruption_in_one_document() {
    let set = catalog();
    let src = format!(
        "Total {}500 {} paid{}",
        matcher_of("mojibake.rupee_double"),
        matcher_of("mojibake.em_dash_double"),
        matcher_of("mojibake.ellipsis_double"),
    );
    let out = rewrite(&src, [&set]);
    assert_eq!(out.text, "Total ₹500 — paid…");
    assert!(out.changed);
}
