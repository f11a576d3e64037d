//! CLI argument parsing and forge platform configuration.
use clap::Parser;
use secrecy::SecretString;
use std::env;

use crate::{
    error::{LabelsaurusError, Result},
    event::PullRequestContext,
    forge::config::RemoteConfig,
};

/// CLI arguments for a single labeling run.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// Repository path of the labeling rules file (e.g. .github/labelsaurus.yml).
    pub config_path: String,

    #[arg(long, default_value = "")]
    /// Path to the pull request event payload. Falls back to GITHUB_EVENT_PATH env var.
    pub event_path: String,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value = "github.com")]
    /// GitHub host, for GitHub Enterprise instances.
    pub github_host: String,

    #[arg(long, default_value_t = false)]
    /// Log label operations without applying them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

impl Args {
    /// Repository path of the rules document. Required.
    pub fn config_path(&self) -> Result<String> {
        if self.config_path.is_empty() {
            return Err(LabelsaurusError::MissingConfigPath);
        }

        Ok(self.config_path.clone())
    }

    /// Location of the event payload on disk, from the CLI argument or the
    /// environment the trigger infrastructure provides.
    pub fn event_path(&self) -> Result<String> {
        if !self.event_path.is_empty() {
            return Ok(self.event_path.clone());
        }

        if let Ok(path) = env::var("GITHUB_EVENT_PATH")
            && !path.is_empty()
        {
            return Ok(path);
        }

        Err(LabelsaurusError::InvalidArgs(
            "must set --event-path or GITHUB_EVENT_PATH".into(),
        ))
    }

    /// Configure the remote repository connection for the triggering pull
    /// request.
    pub fn get_remote(&self, ctx: &PullRequestContext) -> Result<RemoteConfig> {
        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(LabelsaurusError::InvalidArgs(
                "must set github token".into(),
            ));
        }

        Ok(RemoteConfig {
            host: self.github_host.clone(),
            scheme: "https".to_string(),
            owner: ctx.owner.clone(),
            repo: ctx.repo.clone(),
            token: SecretString::from(token),
            dry_run: self.dry_run,
        })
    }
}
