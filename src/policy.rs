//! Base branch policy evaluation.
//!
//! A pull request whose base branch is not one of the configured trunk
//! branches is part of a dependent PR chain, and gets the policy labels
//! applied regardless of its title. The same labels stay managed on trunk
//! so they are removed again once the pull request is retargeted.
use std::collections::BTreeSet;

use crate::config::BasePolicy;

/// Compute the labels forced onto the pull request by the base policy.
///
/// Returns an empty set when no policy is configured or when the base
/// branch is a trunk branch.
pub fn evaluate(
    base_branch: &str,
    policy: Option<&BasePolicy>,
) -> BTreeSet<String> {
    let Some(policy) = policy else {
        return BTreeSet::new();
    };

    if policy.branches.iter().any(|b| b == base_branch) {
        return BTreeSet::new();
    }

    policy.labels.iter().cloned().collect()
}
