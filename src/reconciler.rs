//! Reconciles a pull request's labels against the desired set.
//!
//! The desired set is derived from title rules and the base branch policy;
//! the current set is fetched fresh from the forge. The diff only ever
//! considers labels inside the managed universe, so labels applied by hand
//! are left alone no matter what the rules say.
use log::*;
use std::collections::BTreeSet;

use crate::{
    error::{LabelsaurusError, Result},
    forge::{
        manager::ForgeManager,
        request::{AddLabelsRequest, ListLabelsRequest, RemoveLabelRequest},
    },
};

/// The label operations a reconcile run will perform, in the order they
/// are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl ReconcilePlan {
    /// True when the run has nothing to do.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diff the desired label set against the pull request's current labels.
///
/// Only current labels inside `managed` are considered for removal;
/// everything else on the pull request stays untouched. Output order is
/// deterministic.
pub fn plan(
    desired: &BTreeSet<String>,
    managed: &BTreeSet<String>,
    current: &[String],
) -> ReconcilePlan {
    let current_managed: BTreeSet<String> = current
        .iter()
        .filter(|label| managed.contains(*label))
        .cloned()
        .collect();

    let to_remove = current_managed.difference(desired).cloned().collect();
    let to_add = desired.difference(&current_managed).cloned().collect();

    ReconcilePlan { to_add, to_remove }
}

/// Fetch the pull request's labels, compute the plan, and apply it.
///
/// Additions go out as one batched call. Removals are issued per label and
/// tolerated individually: a failed removal is logged, the remaining
/// removals are still attempted, and the failures are reported together at
/// the end. Running this twice in a row with unchanged state performs zero
/// mutating calls the second time.
pub async fn reconcile(
    desired: &BTreeSet<String>,
    managed: &BTreeSet<String>,
    pr_number: u64,
    forge: &ForgeManager,
) -> Result<ReconcilePlan> {
    let current = forge.list_labels(ListLabelsRequest { pr_number }).await?;

    debug!("current labels: {:?}", current);

    let plan = plan(desired, managed, &current);

    if plan.is_noop() {
        info!("labels already match: nothing to do");
        return Ok(plan);
    }

    if plan.to_add.is_empty() {
        info!("no assignable labels were detected");
    } else {
        forge
            .add_labels(AddLabelsRequest {
                pr_number,
                labels: plan.to_add.clone(),
            })
            .await?;
        info!("added labels: {}", plan.to_add.join(", "));
    }

    if plan.to_remove.is_empty() {
        info!("no removable labels were detected");
    } else {
        let mut failed: Vec<String> = vec![];

        for label in &plan.to_remove {
            let req = RemoveLabelRequest {
                pr_number,
                label: label.clone(),
            };

            if let Err(err) = forge.remove_label(req).await {
                error!("failed to remove label '{label}': {err}");
                failed.push(label.clone());
            }
        }

        if !failed.is_empty() {
            return Err(LabelsaurusError::forge(format!(
                "failed to remove labels: {}",
                failed.join(", ")
            )));
        }

        info!("removed labels: {}", plan.to_remove.join(", "));
    }

    Ok(plan)
}
