//! Manager that wraps forge implementations
use log::*;

use crate::{
    config::{self, RuleSet},
    error::{LabelsaurusError, Result},
    forge::{
        config::RemoteConfig,
        request::{
            AddLabelsRequest, GetFileContentRequest, ListLabelsRequest,
            RemoveLabelRequest,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        self.forge.get_file_content(req).await
    }

    /// Fetch and decode the labeling rules document.
    ///
    /// A missing file is fatal: no labels are touched when the rules
    /// cannot be loaded. An empty file is fine and yields an empty set.
    pub async fn load_rules(
        &self,
        path: &str,
        branch: Option<String>,
    ) -> Result<RuleSet> {
        let req = GetFileContentRequest {
            path: path.to_string(),
            branch,
        };

        match self.forge.get_file_content(req).await {
            Ok(Some(content)) => config::decode(content.as_bytes()),
            Ok(None) => {
                Err(LabelsaurusError::config_fetch(path, "file not found"))
            }
            Err(err) => {
                Err(LabelsaurusError::config_fetch(path, err.to_string()))
            }
        }
    }

    pub async fn list_labels(
        &self,
        req: ListLabelsRequest,
    ) -> Result<Vec<String>> {
        self.forge.list_labels(req).await
    }

    pub async fn add_labels(&self, req: AddLabelsRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would add labels: req: {:#?}", req);
            return Ok(());
        }
        self.forge.add_labels(req).await
    }

    pub async fn remove_label(&self, req: RemoveLabelRequest) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would remove label: req: {:#?}", req);
            return Ok(());
        }
        self.forge.remove_label(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DEFAULT_CONFIG_FILE, forge::traits::MockForge};

    #[tokio::test]
    async fn load_rules_decodes_fetched_document() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(RemoteConfig::default);
        mock_forge
            .expect_get_file_content()
            .with(mockall::predicate::eq(GetFileContentRequest {
                path: DEFAULT_CONFIG_FILE.to_string(),
                branch: Some("feature/x".to_string()),
            }))
            .returning(|_| Ok(Some("feat: 'feat:'".to_string())));

        let manager = ForgeManager::new(Box::new(mock_forge));
        let rules = manager
            .load_rules(DEFAULT_CONFIG_FILE, Some("feature/x".into()))
            .await
            .unwrap();

        assert_eq!(rules.rules.len(), 1);
        assert_eq!(rules.rules[0].label, "feat");
    }

    #[tokio::test]
    async fn load_rules_fails_when_file_is_missing() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(RemoteConfig::default);
        mock_forge.expect_get_file_content().returning(|_| Ok(None));

        let manager = ForgeManager::new(Box::new(mock_forge));
        let result = manager.load_rules(DEFAULT_CONFIG_FILE, None).await;

        assert!(matches!(
            result,
            Err(LabelsaurusError::ConfigFetch { .. })
        ));
    }

    #[tokio::test]
    async fn load_rules_accepts_empty_document() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(RemoteConfig::default);
        mock_forge
            .expect_get_file_content()
            .returning(|_| Ok(Some("".to_string())));

        let manager = ForgeManager::new(Box::new(mock_forge));
        let rules = manager
            .load_rules(DEFAULT_CONFIG_FILE, None)
            .await
            .unwrap();

        assert!(rules.rules.is_empty());
        assert!(rules.base.is_none());
    }

    #[tokio::test]
    async fn dry_run_prevents_add_labels() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(|| RemoteConfig {
                dry_run: true,
                ..Default::default()
            });

        let manager = ForgeManager::new(Box::new(mock_forge));
        let req = AddLabelsRequest {
            pr_number: 42,
            labels: vec!["feat".to_string()],
        };
        let result = manager.add_labels(req).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn dry_run_prevents_remove_label() {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(|| RemoteConfig {
                dry_run: true,
                ..Default::default()
            });

        let manager = ForgeManager::new(Box::new(mock_forge));
        let req = RemoveLabelRequest {
            pr_number: 42,
            label: "feat".to_string(),
        };
        let result = manager.remove_label(req).await;

        assert!(result.is_ok());
    }
}
