//! Catalog explanations for the `assetfix explain` command.
//!
//! Each entry covers what the catalog repairs, why its rule order matters,
//! and how to fix files by hand when a rule does not fire.

use assetfix_domain::CatalogId;

#[derive(Debug, Clone)]
pub struct CatalogExplanation {
    pub id: CatalogId,
    /// Subcommand that runs the catalog on its own.
    pub command: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub ordering: &'static str,
    pub remediation: &'static str,
}

pub static CATALOG_REGISTRY: &[CatalogExplanation] = &[
    CatalogExplanation {
        id: CatalogId::Mojibake,
        command: "clean",
        title: "Mojibake repair",
        description: r#"Replaces known corrupted character sequences in .html, .js and .css files.

The sequences come from UTF-8 text that was decoded as Windows-1252 and saved
again, sometimes two or three times over. Each rule matches one exact corrupted
sequence byte for byte:
- currency and typographic punctuation (rupee, euro, em dash, ellipsis, curly
  quotes, bullet) are restored to the single intended character
- emoji and invisible characters (zero-width space, byte-order mark) are
  removed outright

Nothing is guessed: a file is only touched when it contains a sequence that is
listed with `assetfix list-rules --catalog mojibake`."#,
        ordering: r#"Corruption nests. The triple-encoded rupee sign contains the double-encoded
euro sign, so running the euro rule first would leave half a rupee behind.
Rules run longest-first, and the catalog refuses to load if a shorter sequence
is listed ahead of a longer one that contains it."#,
        remediation: r#"If a corrupted sequence survives a run, it is not in the catalog yet:
1. Find the exact bytes (e.g. `grep -n 'Ã' <file>`).
2. Re-save the file as UTF-8 from the original source if you have it.
3. Otherwise replace the sequence by hand and add it to the catalog so the
   next occurrence is repaired automatically."#,
    },
    CatalogExplanation {
        id: CatalogId::ApiBase,
        command: "api-base",
        title: "API base canonicalization",
        description: r#"Rewrites every historical `API_BASE` declaration in .js files to one
expression:

  port 5500 (local static server)  -> http://localhost:8080
  window.API_BASE set and non-empty -> window.API_BASE
  otherwise                         -> "" (same-origin requests)

Three earlier conditional forms and hardcoded declarations of the retired
deployment origin are recognised. Whitespace and quote style may vary; the
declaration keyword (const, let, var) is kept.

`visit-report.js` predates the variable entirely. When it still has its
`const API =` endpoint table and no `API_BASE`, the canonical declaration is
inserted above the table and its four relative endpoints are prefixed with
`${API_BASE}`."#,
        ordering: r#"Patterns are anchored on the whole declaration, up to the semicolon, so a
partial or unfamiliar expression never matches. The injection for
`visit-report.js` runs last and only when no other rule changed the file."#,
        remediation: r#"A declaration that is not updated does not match any known form. Replace it
with the canonical expression shown in `assetfix list-rules --catalog api-base`
and make sure every fetch builds its URL as `${API_BASE}/api/...`."#,
    },
    CatalogExplanation {
        id: CatalogId::LegacyOrigin,
        command: "urls",
        title: "Retired origin removal",
        description: r#"Removes the retired absolute backend origin from .js files:
- `const|let API_BASE = "<origin>";` becomes `... = "";`
- `<origin>/api` becomes `/api`

Requests then go to the origin that served the page."#,
        ordering: r#"Declarations are replaced before bare URLs so a declaration is always
rewritten as a whole. When run together with `api-base` (assetfix all), the
declaration is canonicalized first and only the bare URLs are left for this
catalog."#,
        remediation: r#"Search for the origin (`grep -rn onrender.com`) and replace any remaining
occurrence, for example one split across string concatenation, by hand."#,
    },
];

/// Look up a catalog by name (`api-base`) or subcommand (`urls`).
pub fn lookup_catalog(query: &str) -> Option<&'static CatalogExplanation> {
    let normalized = query.trim().to_lowercase().replace('_', "-");
    CATALOG_REGISTRY
        .iter()
        .find(|c| c.id.name() == normalized || c.command == normalized)
}

pub fn list_catalog_names() -> Vec<&'static str> {
    CATALOG_REGISTRY.iter().map(|c| c.id.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let c = lookup_catalog("legacy-origin").expect("by name");
        assert_eq!(c.id, CatalogId::LegacyOrigin);
    }

    #[test]
    fn test_lookup_by_command() {
        assert_eq!(lookup_catalog("clean").map(|c| c.id), Some(CatalogId::Mojibake));
        assert_eq!(lookup_catalog("urls").map(|c| c.id), Some(CatalogId::LegacyOrigin));
    }

    #[test]
    fn test_lookup_case_and_underscores() {
        assert_eq!(lookup_catalog("API_BASE").map(|c| c.id), Some(CatalogId::ApiBase));
    }

    #[test]
    fn test_every_catalog_explained() {
        for id in CatalogId::ALL {
            assert!(lookup_catalog(id.name()).is_some(), "{id} missing");
        }
        assert_eq!(CATALOG_REGISTRY.len(), CatalogId::ALL.len());
    }
}
