//! The pure text transform shared by every catalog.

use crate::fallback::InjectionFallback;
use crate::rules::RuleSet;
use tracing::{debug, trace};

/// A rule that changed the text during a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredRule {
    pub rule_set: String,
    pub label: String,
    pub rule_id: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone)]
pub struct Rewrite {
    pub text: String,
    pub changed: bool,
    pub fired: Vec<FiredRule>,
}

impl Rewrite {
    /// Label of the first rule set that changed the text.
    pub fn label(&self) -> Option<&str> {
        self.fired.first().map(|f| f.label.as_str())
    }

    pub fn rule_set(&self) -> Option<&str> {
        self.fired.first().map(|f| f.rule_set.as_str())
    }
}

/// Apply every rule of every set, in order, to `text`.
///
/// Each rule replaces all non-overlapping occurrences of its matcher in the
/// current text before the next rule runs. A deletion can join its
/// neighbours into a matcher that already ran, so the whole sequence is
/// repeated until a pass changes nothing, at most once per rule plus one.
/// `changed` is true only when the output differs from the input.
pub fn rewrite<'a, I>(text: &str, rule_sets: I) -> Rewrite
where
    I: IntoIterator<Item = &'a RuleSet>,
{
    let sets: Vec<&RuleSet> = rule_sets.into_iter().collect();
    let max_passes = sets.iter().map(|s| s.len()).sum::<usize>() + 1;

    let mut current = text.to_string();
    let mut fired = Vec::new();
    let mut passes = 0;
    while apply_pass(&sets, &mut current, &mut fired) {
        passes += 1;
        if passes == max_passes {
            debug!(passes, "rewrite did not settle");
            break;
        }
    }

    let changed = current != text;
    Rewrite {
        text: current,
        changed,
        fired,
    }
}

/// One ordered pass over every rule. Returns whether anything changed.
fn apply_pass(sets: &[&RuleSet], current: &mut String, fired: &mut Vec<FiredRule>) -> bool {
    let mut progressed = false;
    for set in sets {
        for rule in set.rules() {
            let Some((next, occurrences)) = rule.apply(current) else {
                continue;
            };
            if next == *current {
                continue;
            }
            trace!(rule = rule.id(), occurrences, "rule fired");
            match fired
                .iter_mut()
                .find(|f| f.rule_set == set.name() && f.rule_id == rule.id())
            {
                Some(hit) => hit.occurrences += occurrences,
                None => fired.push(FiredRule {
                    rule_set: set.name().to_string(),
                    label: set.label().to_string(),
                    rule_id: rule.id().to_string(),
                    occurrences,
                }),
            }
            *current = next;
            progressed = true;
        }
    }
    progressed
}

/// `rewrite`, then the injection fallbacks.
///
/// Fallbacks run last, against the rewritten text. A fallback is skipped
/// when the rule set it belongs to changed the file; changes made by other
/// sets do not hold it back, so one run reaches the fixed point. At most one
/// fallback fires.
pub fn rewrite_asset<'a, I>(
    file_name: &str,
    text: &str,
    rule_sets: I,
    fallbacks: &[InjectionFallback],
) -> Rewrite
where
    I: IntoIterator<Item = &'a RuleSet>,
{
    let mut out = rewrite(text, rule_sets);

    for fallback in fallbacks {
        let owner_fired = fallback
            .owner()
            .is_some_and(|owner| out.fired.iter().any(|f| f.rule_set == owner));
        if owner_fired {
            continue;
        }
        if let Some(injected) = fallback.apply(file_name, &out.text) {
            out.fired.push(FiredRule {
                rule_set: fallback.name().to_string(),
                label: fallback.label().to_string(),
                rule_id: fallback.name().to_string(),
                occurrences: 1,
            });
            out.changed = injected != text;
            out.text = injected;
            break;
        }
    }

    out
}
