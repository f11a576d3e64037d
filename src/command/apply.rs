//! Single-shot labeling run implementation.
use log::*;
use std::collections::BTreeSet;

use crate::{
    cli,
    error::Result,
    event::PullRequestContext,
    forge::{github::Github, manager::ForgeManager},
    matcher, policy, reconciler,
};

/// Parse the trigger context, connect to the forge, and reconcile the pull
/// request's labels.
pub async fn execute(args: &cli::Args) -> Result<()> {
    let config_path = args.config_path()?;

    info!("configuration path is: {config_path}");

    let event_path = args.event_path()?;
    let ctx = PullRequestContext::from_event_file(&event_path)?;

    info!("pull request base branch is: {}", ctx.base_branch);
    info!("pull request title is: {}", ctx.title);

    let remote_config = args.get_remote(&ctx)?;
    let forge = Github::new(remote_config)?;
    let manager = ForgeManager::new(Box::new(forge));

    run(&ctx, &config_path, &manager).await
}

/// The run itself, separated from client construction so it can be
/// exercised against a mocked forge.
pub(crate) async fn run(
    ctx: &PullRequestContext,
    config_path: &str,
    forge: &ForgeManager,
) -> Result<()> {
    // the rules document is read at the PR head so rule changes made in
    // the PR itself take effect for that PR
    let rules = forge
        .load_rules(config_path, Some(ctx.head_ref.clone()))
        .await?;

    debug!("loaded config: {:#?}", rules);

    if rules.rules.is_empty() && rules.base.is_none() {
        info!("no labeling rules configured: nothing to do");
        return Ok(());
    }

    let mut desired: BTreeSet<String> =
        matcher::match_title(&ctx.title, &rules.rules);
    desired.extend(policy::evaluate(&ctx.base_branch, rules.base.as_ref()));

    let managed = rules.managed_labels();

    debug!("desired labels: {:?}", desired);
    debug!("managed labels: {:?}", managed);

    reconciler::reconcile(&desired, &managed, ctx.number, forge).await?;

    Ok(())
}
