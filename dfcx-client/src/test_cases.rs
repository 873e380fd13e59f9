//! Test-case API endpoints

use crate::DialogflowClient;
use crate::error::{ClientError, Result};
use dfcx_core::domain::operation::Operation;
use dfcx_core::domain::test_case::TestCase;
use dfcx_core::dto::test_case::{
    BatchDeleteTestCasesRequest, ListTestCasesResponse, RunTestCaseRequest,
};

/// Largest page the service returns for test cases
const PAGE_SIZE: u32 = 20;

impl DialogflowClient {
    // =============================================================================
    // Test Case Management
    // =============================================================================

    /// Create a test case under an agent
    ///
    /// Fails with [`ClientError::AlreadyExists`](crate::ClientError::AlreadyExists)
    /// when the agent already holds a test case with the same display name.
    ///
    /// # Arguments
    /// * `agent` - Agent resource name (`projects/<p>/locations/<l>/agents/<a>`)
    /// * `test_case` - The test case to create; `name` must be empty
    pub async fn create_test_case(&self, agent: &str, test_case: &TestCase) -> Result<TestCase> {
        let url = self.resource_url(&format!("{}/testCases", agent));
        let response = self.post(&url).json(test_case).send().await?;

        self.handle_response(response).await
    }

    /// List one page of an agent's test cases
    ///
    /// # Arguments
    /// * `agent` - Agent resource name
    /// * `page_token` - Token returned by the previous page, `None` for the first page
    pub async fn list_test_cases(
        &self,
        agent: &str,
        page_token: Option<&str>,
    ) -> Result<ListTestCasesResponse> {
        let url = self.resource_url(&format!("{}/testCases", agent));
        let mut request = self
            .get(&url)
            .query(&[("pageSize", PAGE_SIZE.to_string())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// List every test case of an agent, following page tokens
    pub async fn list_all_test_cases(&self, agent: &str) -> Result<Vec<TestCase>> {
        let mut test_cases = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_test_cases(agent, page_token.as_deref()).await?;
            page_token = page.next_page().map(str::to_string);
            test_cases.extend(page.test_cases);

            if page_token.is_none() {
                return Ok(test_cases);
            }
        }
    }

    /// Get a test case by resource name
    pub async fn get_test_case(&self, name: &str) -> Result<TestCase> {
        let url = self.resource_url(name);
        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Delete several test cases of one agent
    ///
    /// # Arguments
    /// * `agent` - Agent resource name
    /// * `names` - Full resource names of the test cases to delete
    pub async fn batch_delete_test_cases(&self, agent: &str, names: Vec<String>) -> Result<()> {
        if names.is_empty() {
            return Err(ClientError::InvalidRequest(
                "batch delete needs at least one test case name".to_string(),
            ));
        }

        let url = self.resource_url(&format!("{}/testCases:batchDelete", agent));
        let response = self
            .post(&url)
            .json(&BatchDeleteTestCasesRequest { names })
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Test Case Runs
    // =============================================================================

    /// Start a run of a test case
    ///
    /// # Returns
    /// The long-running operation tracking the run
    pub async fn run_test_case(&self, req: &RunTestCaseRequest) -> Result<Operation> {
        if req.name.is_empty() {
            return Err(ClientError::InvalidRequest(
                "test case name cannot be empty".to_string(),
            ));
        }

        let url = self.resource_url(&format!("{}:run", req.name));
        let response = self.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
