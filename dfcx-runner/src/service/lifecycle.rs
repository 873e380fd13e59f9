//! Test case lifecycle
//!
//! Creates the test case a run needs and removes it afterwards. Creating a
//! test case whose display name is already taken adopts the existing one, so
//! an interrupted previous session does not block the next.

use dfcx_core::domain::test_case::{TestCase, TestConfig};
use dfcx_core::dto::turn::ExpectedTurn;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, RunError};
use crate::repository::TestCaseRepository;

/// Owns at most one remote test case of an agent
pub struct TestCaseLifecycle {
    repository: Arc<dyn TestCaseRepository>,
    agent: String,
    start_flow: String,
    test_case: Option<TestCase>,
}

impl TestCaseLifecycle {
    /// # Arguments
    /// * `agent` - Agent resource name
    /// * `start_flow` - Flow resource name the test case starts in
    pub fn new(
        repository: Arc<dyn TestCaseRepository>,
        agent: impl Into<String>,
        start_flow: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            agent: agent.into(),
            start_flow: start_flow.into(),
            test_case: None,
        }
    }

    pub fn from_config(config: &Config, repository: Arc<dyn TestCaseRepository>) -> Self {
        Self::new(repository, config.agent.clone(), config.start_flow_name())
    }

    /// The test case created or adopted by [`initialize`](Self::initialize)
    pub fn test_case(&self) -> Result<&TestCase> {
        self.test_case.as_ref().ok_or(RunError::NotInitialized)
    }

    /// Creates the test case, or adopts an existing one with the same display name
    pub async fn initialize(
        &mut self,
        display_name: &str,
        turns: &[ExpectedTurn],
        is_webhook_enabled: bool,
    ) -> Result<&TestCase> {
        let draft = TestCase {
            display_name: display_name.to_string(),
            test_case_conversation_turns: turns
                .iter()
                .map(|turn| turn.to_conversation_turn(is_webhook_enabled))
                .collect(),
            test_config: Some(TestConfig::for_flow(self.start_flow.clone())),
            ..Default::default()
        };

        let test_case = match self.repository.create_test_case(&self.agent, &draft).await {
            Ok(created) => {
                info!(name = %created.name, display_name, "Test case created");
                created
            }
            Err(err) if err.is_already_exists() => {
                debug!(display_name, "Test case already exists, looking it up");
                let existing = self
                    .repository
                    .list_test_cases(&self.agent)
                    .await?
                    .into_iter()
                    .find(|t| t.display_name == display_name)
                    .ok_or(err)?;

                let test_case = self.repository.get_test_case(&existing.name).await?;
                info!(name = %test_case.name, display_name, "Adopted existing test case");
                test_case
            }
            Err(err) => return Err(err.into()),
        };

        Ok(&*self.test_case.insert(test_case))
    }

    /// Deletes the held test case; a test case that is already gone counts as deleted
    pub async fn tear_down(&mut self) -> Result<()> {
        let name = self.test_case()?.name.clone();

        match self
            .repository
            .batch_delete_test_cases(&self.agent, vec![name.clone()])
            .await
        {
            Ok(()) => {
                info!(%name, "Test case deleted");
                self.test_case = None;
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                debug!(%name, "Test case already deleted");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
