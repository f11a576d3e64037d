//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            AddLabelsRequest, GetFileContentRequest, ListLabelsRequest,
            RemoveLabelRequest,
        },
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    /// Fetch a repository file's decoded content. Returns `None` when the
    /// file does not exist at the requested ref.
    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>>;

    /// List the names of the labels currently on a pull request.
    async fn list_labels(&self, req: ListLabelsRequest) -> Result<Vec<String>>;

    /// Add labels to a pull request in a single batched call.
    async fn add_labels(&self, req: AddLabelsRequest) -> Result<()>;

    /// Remove one label from a pull request. Removing a label that is
    /// already absent is a no-op.
    async fn remove_label(&self, req: RemoveLabelRequest) -> Result<()>;
}
