//! Matches pull request titles against configured label rules.
use log::*;
use regex::Regex;
use std::collections::BTreeSet;

use crate::{
    config::Rule,
    error::{LabelsaurusError, Result},
};

/// Compile a rule's pattern anchored to the start of the title.
///
/// The pattern must match from the first character of the title but need
/// not consume it entirely.
fn compile(rule: &Rule) -> Result<Regex> {
    Regex::new(format!("^{}", rule.pattern).as_str()).map_err(|source| {
        LabelsaurusError::InvalidPattern {
            label: rule.label.clone(),
            source,
        }
    })
}

/// Compute the set of labels whose pattern matches the title prefix.
///
/// Rules are evaluated independently; a title may satisfy any number of
/// them. A rule whose pattern fails to compile is logged and skipped so a
/// single malformed rule does not block the remaining ones.
pub fn match_title(title: &str, rules: &[Rule]) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    for rule in rules {
        match compile(rule) {
            Ok(re) => {
                if re.is_match(title) {
                    debug!("title matched rule for label '{}'", rule.label);
                    labels.insert(rule.label.clone());
                }
            }
            Err(err) => {
                warn!("skipping rule: {err}");
            }
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(label: &str, pattern: &str) -> Rule {
        Rule {
            label: label.to_string(),
            pattern: pattern.to_string(),
        }
    }

    #[test]
    fn matches_title_prefix() {
        let rules = vec![rule("feat", "feat:"), rule("fix", "fix:")];

        let labels = match_title("feat: add login", &rules);

        assert_eq!(labels.len(), 1);
        assert!(labels.contains("feat"));
    }

    #[test]
    fn no_rule_matches_unconfigured_prefix() {
        let rules = vec![rule("feat", "feat:"), rule("fix", "fix:")];

        let labels = match_title("chore: bump deps", &rules);

        assert!(labels.is_empty());
    }

    #[test]
    fn pattern_must_match_from_the_first_character() {
        let rules = vec![rule("feat", "feat:")];

        let labels = match_title("revert feat: add login", &rules);

        assert!(labels.is_empty());
    }

    #[test]
    fn pattern_need_not_consume_the_whole_title() {
        let rules = vec![rule("feat", "feat(\\w+):")];

        let labels = match_title("feat(auth): add login", &rules);

        assert!(labels.contains("feat"));
    }

    #[test]
    fn title_may_satisfy_multiple_rules() {
        let rules =
            vec![rule("feat", "feat"), rule("conventional", "\\w+(\\(\\w+\\))?:")];

        let labels = match_title("feat(auth): add login", &rules);

        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn result_is_independent_of_rule_order() {
        let mut rules = vec![
            rule("feat", "feat:"),
            rule("fix", "fix:"),
            rule("any", "\\w+"),
        ];

        let forward = match_title("feat: add login", &rules);
        rules.reverse();
        let backward = match_title("feat: add login", &rules);

        assert_eq!(forward, backward);
    }

    #[test]
    fn malformed_pattern_is_skipped_and_remaining_rules_apply() {
        let rules = vec![rule("bad", "("), rule("feat", "feat:")];

        let labels = match_title("feat: add login", &rules);

        assert_eq!(labels.len(), 1);
        assert!(labels.contains("feat"));
    }
}
