//! Command execution and orchestration for labelsaurus.
//!
//! There is a single command: one labeling run for one pull request event.
//! It parses the trigger context, loads the rules document from the
//! repository, and reconciles the pull request's labels against the
//! desired set.

/// The single-shot labeling run.
pub mod apply;
