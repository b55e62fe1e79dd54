//! Corruption-repair catalog.
//!
//! Every matcher is a byte-exact artifact observed in the asset tree: UTF-8
//! text that was decoded as Windows-1252 and re-encoded, two to four times
//! over. Entries are curated, never derived. Longer sequences come first
//! because several short entries (the double-encoded euro sign in
//! particular) are embedded inside the longer ones.

use crate::error::CatalogError;
use crate::matcher::{Matcher, Replacement};
use crate::rules::{Rule, RuleSet};

pub const NAME: &str = "mojibake";
pub const LABEL: &str = "Cleaned:";
pub const EXTENSIONS: &[&str] = &[".html", ".js", ".css"];

/// `(rule id, corrupted sequence, replacement)`, longest-first.
///
/// An empty replacement deletes the span. New variants go below the longest
/// entry that contains them; `RuleSet::new` rejects anything out of order.
pub const RULES: &[(&str, &str, &str)] = &[
    // “‚ quote run, four passes deep
    ("mojibake.quote_marks_quad", "ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€¦Ã¢â‚¬Å“ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€¦Ã‚Â¡ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€šÃ‚Â ", ""),
    // ✅
    ("mojibake.check_mark_quad", "ÃƒÆ’Ã‚Â¢Ãƒâ€¦Ã¢â‚¬Å“ÃƒÂ¢Ã¢â€šÂ¬Ã‚Â¦", ""),
    // two emoji whose trailing bytes were lost
    ("mojibake.emoji_pair_broken", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã‚Â ÃƒÂ¢Ã¢â€šÂ¬Ã‚Â ", ""),
    // 👨‍💼
    ("mojibake.man_office_worker_quad", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã‹Å“Ãƒâ€šÃ‚Â¨ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€šÃ‚Â ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã¢â€žÂ¢Ãƒâ€šÃ‚Â¼", ""),
    // 👨‍⚕️
    ("mojibake.man_health_worker_quad", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã‹Å“Ãƒâ€šÃ‚Â¨ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€šÃ‚Â ÃƒÆ’Ã‚Â¢Ãƒâ€¦Ã‚Â¡ÃƒÂ¢Ã¢â€šÂ¬Ã‚Â¢ÃƒÆ’Ã‚Â¯Ãƒâ€šÃ‚Â¸Ãƒâ€šÃ‚Â ", ""),
    // one emoji whose trailing bytes were lost
    ("mojibake.emoji_single_broken", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã‚Â Ãƒâ€šÃ‚Â ", ""),
    // 📋
    ("mojibake.clipboard_quad", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã…â€œÃƒÂ¢Ã¢â€šÂ¬Ã‚Â¹", ""),
    // 🧾
    ("mojibake.receipt_quad", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸Ãƒâ€šÃ‚Â§Ãƒâ€šÃ‚Â¾", ""),
    // 🧑‍💼
    ("mojibake.office_worker_quad", "ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸Ãƒâ€šÃ‚Â§ÃƒÂ¢Ã¢â€šÂ¬Ã‹Å“ÃƒÆ’Ã‚Â¢ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¬Ãƒâ€šÃ‚Â ÃƒÆ’Ã‚Â°Ãƒâ€¦Ã‚Â¸ÃƒÂ¢Ã¢â€šÂ¬Ã¢â€žÂ¢Ãƒâ€šÃ‚Â¼", ""),
    ("mojibake.rupee_triple", "ÃƒÂ¢Ã¢â‚¬Å¡Ã‚Â¹", "₹"),
    // 0x9D byte already dropped
    ("mojibake.em_dash_triple", "Ã¢â‚¬â€", "—"),
    ("mojibake.rupee_double", "â‚¹", "₹"),
    ("mojibake.euro_double", "â‚¬", "€"),
    ("mojibake.em_dash_double", "â€”", "—"),
    ("mojibake.ellipsis_double", "â€¦", "…"),
    ("mojibake.en_dash_double", "â€“", "–"),
    ("mojibake.left_single_quote_double", "â€˜", "‘"),
    ("mojibake.right_single_quote_double", "â€™", "’"),
    ("mojibake.left_double_quote_double", "â€œ", "“"),
    ("mojibake.bullet_double", "â€¢", "•"),
    ("mojibake.zero_width_space_double", "â€‹", ""),
    ("mojibake.byte_order_mark_double", "ï»¿", ""),
];

/// Builds the corruption-repair rule set.
pub fn catalog() -> Result<RuleSet, CatalogError> {
    let rules = RULES
        .iter()
        .map(|(id, from, to)| {
            Rule::new(
                *id,
                Matcher::literal(*from),
                Replacement::Literal((*to).to_string()),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    RuleSet::new(NAME, LABEL, EXTENSIONS.iter().copied(), rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds_and_keeps_order() {
        let set = catalog().expect("catalog validates");
        assert_eq!(set.len(), RULES.len());
        assert_eq!(set.rules()[0].id(), "mojibake.quote_marks_quad");
        assert_eq!(set.label(), "Cleaned:");
    }

    #[test]
    fn only_currency_and_punctuation_map_to_visible_glyphs() {
        let visible: Vec<&str> = RULES
            .iter()
            .filter(|(_, _, to)| !to.is_empty())
            .map(|(_, _, to)| *to)
            .collect();
        for glyph in visible {
            assert_eq!(glyph.chars().count(), 1, "{glyph:?} is not a single glyph");
        }
    }
}
