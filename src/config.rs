//! Configuration loading and parsing for labeling rule files.
//!
//! The rules document is YAML and comes in two forms. The simple form maps
//! label names straight to title patterns:
//!
//! ```yaml
//! feat: "feat:"
//! fix: "fix:"
//! ```
//!
//! The extended form nests the same mapping under `labels` and adds an
//! optional `base` policy describing trunk branches and the labels forced
//! onto pull requests that target anything else:
//!
//! ```yaml
//! labels:
//!   feat: "feat:"
//! base:
//!   branches: [main, master]
//!   labels: ["In PR Chain"]
//! ```
use log::*;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeSet;

use crate::error::{LabelsaurusError, Result};

/// Default repository path of the rules document.
pub const DEFAULT_CONFIG_FILE: &str = ".github/labelsaurus.yml";

/// A single labeling rule: a label name and the title pattern that earns it.
///
/// The pattern is interpreted as a regular expression anchored to the start
/// of the pull request title. It is not validated here; a pattern that
/// fails to compile is skipped at matching time.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub label: String,
    pub pattern: String,
}

/// Base branch policy from the extended config form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BasePolicy {
    /// Trunk branches. A pull request based on any other branch gets the
    /// policy labels applied.
    #[serde(default)]
    pub branches: Vec<String>,
    /// Labels forced onto off-trunk pull requests.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Decoded rule set. Immutable once decoded; lives for one run.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub base: Option<BasePolicy>,
}

impl RuleSet {
    /// All label names this automation is entitled to add or remove: every
    /// rule label plus every base policy label. Labels outside this set are
    /// never touched, even when present on the pull request.
    ///
    /// Base policy labels are included unconditionally so they get removed
    /// once a pull request is retargeted back to a trunk branch.
    pub fn managed_labels(&self) -> BTreeSet<String> {
        let mut managed: BTreeSet<String> =
            self.rules.iter().map(|r| r.label.clone()).collect();

        if let Some(base) = &self.base {
            managed.extend(base.labels.iter().cloned());
        }

        managed
    }
}

#[derive(Debug, Deserialize)]
struct RawExtended {
    #[serde(default)]
    labels: serde_yaml::Mapping,
    base: Option<BasePolicy>,
}

/// Decode a raw rules document into a [`RuleSet`].
///
/// An empty or null document decodes to an empty rule set rather than
/// failing; the run then has nothing to do.
pub fn decode(raw: &[u8]) -> Result<RuleSet> {
    if raw.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(RuleSet::default());
    }

    let doc: Value = serde_yaml::from_slice(raw)?;

    match doc {
        Value::Null => Ok(RuleSet::default()),
        Value::Mapping(map) => {
            let labels_key = Value::String("labels".to_string());
            let base_key = Value::String("base".to_string());
            let extended =
                map.contains_key(&labels_key) || map.contains_key(&base_key);

            if extended {
                let raw: RawExtended =
                    serde_yaml::from_value(Value::Mapping(map))?;
                let ruleset = RuleSet {
                    rules: rules_from_mapping(&raw.labels)?,
                    base: raw.base,
                };
                warn_on_overlap(&ruleset);
                Ok(ruleset)
            } else {
                Ok(RuleSet {
                    rules: rules_from_mapping(&map)?,
                    base: None,
                })
            }
        }
        _ => Err(LabelsaurusError::invalid_config(
            "expected a mapping at the top level of the rules document",
        )),
    }
}

/// Convert a label -> pattern mapping into rules, preserving document order.
fn rules_from_mapping(map: &serde_yaml::Mapping) -> Result<Vec<Rule>> {
    let mut rules = vec![];

    for (key, value) in map {
        let label = key.as_str().ok_or_else(|| {
            LabelsaurusError::invalid_config(format!(
                "label names must be strings, found: {:?}",
                key
            ))
        })?;

        let pattern = value.as_str().ok_or_else(|| {
            LabelsaurusError::invalid_config(format!(
                "pattern for label '{}' must be a string",
                label
            ))
        })?;

        rules.push(Rule {
            label: label.to_string(),
            pattern: pattern.to_string(),
        });
    }

    Ok(rules)
}

fn warn_on_overlap(ruleset: &RuleSet) {
    let Some(base) = &ruleset.base else {
        return;
    };

    for label in &base.labels {
        if ruleset.rules.iter().any(|r| &r.label == label) {
            warn!(
                "label '{label}' is configured both as a title rule and a base policy label"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_form() {
        let raw = b"feat: 'feat:'\nfix: 'fix:'\n";

        let ruleset = decode(raw).unwrap();

        assert_eq!(ruleset.rules.len(), 2);
        assert_eq!(ruleset.rules[0].label, "feat");
        assert_eq!(ruleset.rules[0].pattern, "feat:");
        assert_eq!(ruleset.rules[1].label, "fix");
        assert!(ruleset.base.is_none());
    }

    #[test]
    fn decodes_extended_form() {
        let raw = br#"
labels:
  feat: "feat:"
  fix: "fix:"
base:
  branches:
    - main
    - master
  labels:
    - "In PR Chain"
"#;

        let ruleset = decode(raw).unwrap();

        assert_eq!(ruleset.rules.len(), 2);

        let base = ruleset.base.unwrap();
        assert_eq!(base.branches, vec!["main", "master"]);
        assert_eq!(base.labels, vec!["In PR Chain"]);
    }

    #[test]
    fn decodes_extended_form_without_base() {
        let raw = b"labels:\n  feat: 'feat:'\n";

        let ruleset = decode(raw).unwrap();

        assert_eq!(ruleset.rules.len(), 1);
        assert!(ruleset.base.is_none());
    }

    #[test]
    fn empty_document_decodes_to_empty_ruleset() {
        let ruleset = decode(b"").unwrap();
        assert!(ruleset.rules.is_empty());
        assert!(ruleset.base.is_none());

        let ruleset = decode(b"   \n  ").unwrap();
        assert!(ruleset.rules.is_empty());

        let ruleset = decode(b"null").unwrap();
        assert!(ruleset.rules.is_empty());
    }

    #[test]
    fn rejects_non_mapping_document() {
        let result = decode(b"- feat\n- fix\n");
        assert!(matches!(
            result,
            Err(LabelsaurusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_non_string_pattern() {
        let result = decode(b"feat: [1, 2]\n");
        assert!(matches!(
            result,
            Err(LabelsaurusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn patterns_are_not_validated_at_decode_time() {
        let ruleset = decode(b"bad: '('\n").unwrap();
        assert_eq!(ruleset.rules[0].pattern, "(");
    }

    #[test]
    fn managed_labels_cover_rules_and_base_policy() {
        let raw = br#"
labels:
  feat: "feat:"
base:
  branches: [main]
  labels: ["In PR Chain"]
"#;

        let ruleset = decode(raw).unwrap();
        let managed = ruleset.managed_labels();

        assert!(managed.contains("feat"));
        assert!(managed.contains("In PR Chain"));
        assert_eq!(managed.len(), 2);
    }

    #[test]
    fn base_key_alone_selects_extended_form() {
        let raw = br#"
base:
  branches: [main]
  labels: ["In PR Chain"]
"#;

        let ruleset = decode(raw).unwrap();

        assert!(ruleset.rules.is_empty());
        assert!(ruleset.base.is_some());
    }
}
