//! Runs repository
//!
//! Submits test-case runs and polls the long-running operations they return.

use async_trait::async_trait;
use dfcx_client::{DialogflowClient, Result};
use dfcx_core::domain::operation::{Operation, OperationPoll};
use dfcx_core::domain::test_case::TestCaseRef;
use dfcx_core::dto::test_case::RunTestCaseRequest;
use std::sync::Arc;

/// Repository trait for running test cases
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Requests a run of an existing test case
    ///
    /// # Returns
    /// The operation handle tracking the run
    async fn submit_run(&self, test_case: &TestCaseRef) -> Result<Operation>;

    /// Polls a run's operation once
    ///
    /// A finished operation with a NOT_FOUND status is reported as
    /// `ClientError::NotFound` carrying the service's message.
    async fn poll_operation(&self, operation: &Operation) -> Result<OperationPoll>;
}

/// HTTP implementation of RunRepository
pub struct HttpRunRepository {
    client: Arc<DialogflowClient>,
}

impl HttpRunRepository {
    pub fn new(client: Arc<DialogflowClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RunRepository for HttpRunRepository {
    async fn submit_run(&self, test_case: &TestCaseRef) -> Result<Operation> {
        self.client
            .run_test_case(&RunTestCaseRequest::new(test_case))
            .await
    }

    async fn poll_operation(&self, operation: &Operation) -> Result<OperationPoll> {
        self.client.poll_operation(operation).await
    }
}
