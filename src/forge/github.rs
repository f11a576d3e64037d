//! Implements the Forge trait for Github
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            AddLabelsRequest, GetFileContentRequest, ListLabelsRequest,
            RemoveLabelRequest,
        },
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for repository file access
/// and pull request label operations.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?;
        let instance = builder.build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        let path = req.path.as_str();

        let repos = self
            .instance
            .repos(&self.config.owner, &self.config.repo);
        let mut builder = repos.get_content().path(path);

        if let Some(branch) = &req.branch {
            builder = builder.r#ref(branch);
        }

        let result = builder.send().await;

        match result {
            Err(octocrab::Error::GitHub { source, backtrace }) => {
                if source.status_code == StatusCode::NOT_FOUND {
                    info!("no file found for path: {path}");
                    Ok(None)
                } else {
                    let msg = format!(
                        "error getting contents for path: {path}, status: {}, backtrace: {backtrace}",
                        source.status_code
                    );
                    error!("{msg}");
                    Err(eyre!(msg).into())
                }
            }
            Err(err) => {
                let msg = format!(
                    "encountered error getting file contents for path: {path}: {err}"
                );
                error!("{msg}");
                Err(eyre!(msg).into())
            }
            Ok(mut data) => {
                let items = data.take_items();

                if items.is_empty() {
                    info!("no file found for path: {path}");
                    return Ok(None);
                }

                if let Some(content) = items[0].decoded_content() {
                    Ok(Some(content))
                } else {
                    Err(eyre!(
                        "failed to decode file content for path: {path}"
                    )
                    .into())
                }
            }
        }
    }

    async fn list_labels(&self, req: ListLabelsRequest) -> Result<Vec<String>> {
        let mut page = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_issue(req.pr_number)
            .send()
            .await?;

        let labels = page
            .take_items()
            .into_iter()
            .map(|label| label.name)
            .collect();

        Ok(labels)
    }

    async fn add_labels(&self, req: AddLabelsRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(req.pr_number, &req.labels)
            .await?;

        Ok(())
    }

    async fn remove_label(&self, req: RemoveLabelRequest) -> Result<()> {
        let result = self
            .instance
            .issues(&self.config.owner, &self.config.repo)
            .remove_label(req.pr_number, &req.label)
            .await;

        match result {
            Ok(_) => Ok(()),
            // the label may already be gone: treat not-found as removed
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                debug!(
                    "label '{}' not found on pr #{}: nothing to remove",
                    req.label, req.pr_number
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
