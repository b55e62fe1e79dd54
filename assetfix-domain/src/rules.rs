use crate::error::CatalogError;
use crate::matcher::{Matcher, Replacement};
use std::collections::BTreeSet;

/// One substitution: every occurrence of `matcher` becomes `replacement`.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    matcher: Matcher,
    replacement: Replacement,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        matcher: Matcher,
        replacement: Replacement,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if matcher.accepts_empty() {
            return Err(CatalogError::EmptyMatcher { rule: id });
        }
        if matcher.is_literal() && matches!(replacement, Replacement::Template(_)) {
            return Err(CatalogError::TemplateOnLiteral { rule: id });
        }
        Ok(Self {
            id,
            matcher,
            replacement,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    /// Rewritten text and hit count, or `None` when the rule does not match.
    pub fn apply(&self, text: &str) -> Option<(String, usize)> {
        self.matcher.replace_all(text, &self.replacement)
    }
}

/// An ordered, validated sequence of rules.
///
/// Construction checks the ordering invariants:
/// unique ids and matchers, longest-first ordering for matchers that nest,
/// and no literal replacement that a matcher of the same set would rewrite
/// again.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    label: String,
    extensions: Vec<String>,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new<E, S>(
        name: impl Into<String>,
        label: impl Into<String>,
        extensions: E,
        rules: Vec<Rule>,
    ) -> Result<Self, CatalogError>
    where
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self {
            name: name.into(),
            label: label.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            rules,
        };
        set.validate()?;
        Ok(set)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix used when reporting a file this set changed, e.g. `Cleaned:`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// File-name suffixes this set applies to. Empty means every file.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn applies_to(&self, file_name: &str) -> bool {
        self.extensions.is_empty() || self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = BTreeSet::new();
        for rule in &self.rules {
            if !ids.insert(rule.id()) {
                return Err(CatalogError::DuplicateRuleId {
                    set: self.name.clone(),
                    rule: rule.id().to_string(),
                });
            }
        }

        for (i, earlier) in self.rules.iter().enumerate() {
            for later in &self.rules[i + 1..] {
                if earlier.matcher.is_literal() == later.matcher.is_literal()
                    && earlier.matcher.source() == later.matcher.source()
                {
                    return Err(CatalogError::DuplicateMatcher {
                        set: self.name.clone(),
                        first: earlier.id.clone(),
                        second: later.id.clone(),
                    });
                }

                // Only literal spans can be checked for nesting; pattern
                // rules are covered by the idempotency tests.
                if let Matcher::Literal(longer) = &later.matcher
                    && earlier.matcher.is_match(longer)
                {
                    return Err(CatalogError::ShadowedMatcher {
                        set: self.name.clone(),
                        earlier: earlier.id.clone(),
                        later: later.id.clone(),
                    });
                }
            }
        }

        for rule in &self.rules {
            let Replacement::Literal(text) = &rule.replacement else {
                continue;
            };
            if let Some(hit) = self.rules.iter().find(|m| m.matcher.is_match(text)) {
                return Err(CatalogError::ReplacementRematches {
                    set: self.name.clone(),
                    rule: rule.id.clone(),
                    matcher: hit.id.clone(),
                });
            }
        }

        Ok(())
    }
}
