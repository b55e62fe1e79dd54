#![no_main]

use arbitrary::Arbitrary;
use assetfix_domain::catalog::mojibake;
use assetfix_domain::{ApiBaseProfile, CatalogId, RewritePlan, rewrite};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Piece {
    Word(String),
    Corrupted(u8),
    Declaration(u8),
}

const DECLARATIONS: &[&str] = &[
    r#"const API_BASE = (typeof window.API_BASE !== "undefined") ? window.API_BASE : "";"#,
    r#"let API_BASE = 'https://pharma-track-app.onrender.com';"#,
    "fetch('https://pharma-track-app.onrender.com/api/doctors')",
];

fuzz_target!(|pieces: Vec<Piece>| {
    // Known fragments glued to words: one pass must reach a fixed point.
    let parts: Vec<String> = pieces
        .into_iter()
        .map(|p| match p {
            Piece::Word(w) => w.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
            Piece::Corrupted(i) => {
                mojibake::RULES[i as usize % mojibake::RULES.len()].1.to_string()
            }
            Piece::Declaration(i) => DECLARATIONS[i as usize % DECLARATIONS.len()].to_string(),
        })
        .collect();
    let text = parts.concat();

    let Ok(plan) = RewritePlan::for_catalogs(&CatalogId::ALL, &ApiBaseProfile::default()) else {
        return;
    };
    let once = rewrite(&text, &plan.rule_sets);
    let twice = rewrite(&once.text, &plan.rule_sets);
    assert!(!twice.changed, "not a fixed point: {text:?}");
});
