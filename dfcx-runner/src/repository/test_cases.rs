//! Test cases repository
//!
//! Creates, looks up and deletes test cases of an agent.

use async_trait::async_trait;
use dfcx_client::{DialogflowClient, Result};
use dfcx_core::domain::test_case::TestCase;
use std::sync::Arc;

/// Repository trait for test-case management
#[async_trait]
pub trait TestCaseRepository: Send + Sync {
    /// Creates a test case under `agent`
    async fn create_test_case(&self, agent: &str, test_case: &TestCase) -> Result<TestCase>;

    /// Lists every test case of `agent`
    async fn list_test_cases(&self, agent: &str) -> Result<Vec<TestCase>>;

    /// Gets a test case by resource name
    async fn get_test_case(&self, name: &str) -> Result<TestCase>;

    /// Deletes test cases of `agent` by resource name
    async fn batch_delete_test_cases(&self, agent: &str, names: Vec<String>) -> Result<()>;
}

/// HTTP implementation of TestCaseRepository
pub struct HttpTestCaseRepository {
    client: Arc<DialogflowClient>,
}

impl HttpTestCaseRepository {
    pub fn new(client: Arc<DialogflowClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TestCaseRepository for HttpTestCaseRepository {
    async fn create_test_case(&self, agent: &str, test_case: &TestCase) -> Result<TestCase> {
        self.client.create_test_case(agent, test_case).await
    }

    async fn list_test_cases(&self, agent: &str) -> Result<Vec<TestCase>> {
        self.client.list_all_test_cases(agent).await
    }

    async fn get_test_case(&self, name: &str) -> Result<TestCase> {
        self.client.get_test_case(name).await
    }

    async fn batch_delete_test_cases(&self, agent: &str, names: Vec<String>) -> Result<()> {
        self.client.batch_delete_test_cases(agent, names).await
    }
}
