use crate::error::CatalogError;
use regex::{NoExpand, Regex};

/// How a rule finds its span.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Byte-exact substring. No normalization happens before matching.
    Literal(String),
    /// A bounded regular expression for matchers that must tolerate
    /// whitespace or quote-style variation.
    Pattern(Regex),
}

impl Matcher {
    pub fn literal(text: impl Into<String>) -> Self {
        Matcher::Literal(text.into())
    }

    pub fn pattern(rule: &str, source: &str) -> Result<Self, CatalogError> {
        let re = Regex::new(source).map_err(|source| CatalogError::InvalidPattern {
            rule: rule.to_string(),
            source,
        })?;
        Ok(Matcher::Pattern(re))
    }

    /// Literal text or pattern source.
    pub fn source(&self) -> &str {
        match self {
            Matcher::Literal(s) => s,
            Matcher::Pattern(re) => re.as_str(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Matcher::Literal(_))
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(s) => !s.is_empty() && text.contains(s.as_str()),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }

    pub(crate) fn accepts_empty(&self) -> bool {
        match self {
            Matcher::Literal(s) => s.is_empty(),
            Matcher::Pattern(re) => re.is_match(""),
        }
    }

    /// Replace every non-overlapping occurrence. Returns `None` when nothing
    /// matched.
    pub(crate) fn replace_all(&self, text: &str, replacement: &Replacement) -> Option<(String, usize)> {
        match self {
            Matcher::Literal(s) => {
                let hits = text.matches(s.as_str()).count();
                if hits == 0 {
                    return None;
                }
                Some((text.replace(s.as_str(), replacement.as_str()), hits))
            }
            Matcher::Pattern(re) => {
                let hits = re.find_iter(text).count();
                if hits == 0 {
                    return None;
                }
                let out = match replacement {
                    Replacement::Literal(r) => re.replace_all(text, NoExpand(r)),
                    Replacement::Template(t) => re.replace_all(text, t.as_str()),
                };
                Some((out.into_owned(), hits))
            }
        }
    }
}

/// What a matched span becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Inserted verbatim. The empty string deletes the span.
    Literal(String),
    /// Expanded against a pattern's capture groups (`${name}`).
    Template(String),
}

impl Replacement {
    pub fn as_str(&self) -> &str {
        match self {
            Replacement::Literal(s) | Replacement::Template(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_replaces_every_occurrence() {
        let m = Matcher::literal("â‚¹");
        let (out, hits) = m
            .replace_all("â‚¹10 and â‚¹20", &Replacement::Literal("₹".into()))
            .expect("matched");
        assert_eq!(out, "₹10 and ₹20");
        assert_eq!(hits, 2);
    }

    #[test]
    fn literal_miss_returns_none() {
        let m = Matcher::literal("â‚¹");
        assert!(m.replace_all("plain text", &Replacement::Literal(String::new())).is_none());
    }

    #[test]
    fn literal_replacement_does_not_expand_dollars() {
        let m = Matcher::pattern("t", r"x+").expect("compiles");
        let (out, _) = m
            .replace_all("axxb", &Replacement::Literal("${API_BASE}".into()))
            .expect("matched");
        assert_eq!(out, "a${API_BASE}b");
    }

    #[test]
    fn template_expands_named_groups() {
        let m = Matcher::pattern("t", r"(?P<kw>const|let) X").expect("compiles");
        let (out, _) = m
            .replace_all("let X;", &Replacement::Template("${kw} Y".into()))
            .expect("matched");
        assert_eq!(out, "let Y;");
    }

    #[test]
    fn invalid_pattern_reports_rule() {
        let err = Matcher::pattern("broken", "(").expect_err("does not compile");
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn empty_acceptance() {
        assert!(Matcher::literal("").accepts_empty());
        assert!(Matcher::pattern("t", "a*").expect("compiles").accepts_empty());
        assert!(!Matcher::literal("a").accepts_empty());
    }
}
