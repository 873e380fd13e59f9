//! Test run executor
//!
//! Runs one existing test case to a verdict:
//!
//! ```text
//! Idle -> Submitted -> Polling -> Passed | Failed | RetryPending | RetryExhausted
//!                 ^                            |
//!                 +----------------------------+
//! ```
//!
//! Right after a flow changes, the service may answer a run with a NOT_FOUND
//! "NLU model ... does not exist" error until training catches up. Only that
//! exact message is retried; every other error is returned as is.

use dfcx_client::ClientError;
use dfcx_core::domain::operation::{Operation, OperationPoll};
use dfcx_core::domain::result::{RunResult, TestResult};
use dfcx_core::domain::test_case::{DEFAULT_START_FLOW_ID, TestCaseRef};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, RunError};
use crate::repository::RunRepository;

/// Message of the NOT_FOUND error reported while a flow's NLU model is missing
pub fn model_not_ready_message(flow_id: &str) -> String {
    format!(
        "com.google.apps.framework.request.NotFoundException: \
         NLU model for flow '{}' does not exist. \
         Please try again after retraining the flow.",
        flow_id
    )
}

/// Submits test-case runs, polls them and applies the pass/fail policy
pub struct TestRunExecutor {
    runs: Arc<dyn RunRepository>,
    wait: Duration,
    poll_interval: Duration,
    max_retries: u32,
    not_ready_message: String,
}

impl TestRunExecutor {
    /// Creates an executor with the default timings (10s wait, 3 retries)
    pub fn new(runs: Arc<dyn RunRepository>) -> Self {
        Self {
            runs,
            wait: Duration::from_secs(10),
            poll_interval: Duration::from_secs(1),
            max_retries: 3,
            not_ready_message: model_not_ready_message(DEFAULT_START_FLOW_ID),
        }
    }

    /// Creates an executor with the timings and start flow of `config`
    pub fn from_config(config: &Config, runs: Arc<dyn RunRepository>) -> Self {
        Self::new(runs)
            .with_wait(config.run_wait)
            .with_poll_interval(config.poll_interval)
            .with_max_retries(config.max_retries)
            .with_flow(&config.start_flow)
    }

    /// Delay before every run submission, including the first
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Delay between polls of a still-running operation
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Number of "model not ready" errors tolerated before giving up
    ///
    /// For `max_retries >= 1` a run that keeps hitting the error fails with
    /// `RetryExhausted { attempts: max_retries }`. The run is always submitted
    /// at least once, so with 0 the first such error is final and reports
    /// `attempts: 1` rather than 0.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Flow id whose "model not ready" error counts as transient
    pub fn with_flow(mut self, flow_id: &str) -> Self {
        self.not_ready_message = model_not_ready_message(flow_id);
        self
    }

    /// Runs a test case until it passes, fails, or the retry budget runs out
    ///
    /// # Errors
    /// - `RunError::TestFailure` if the run finished without passing
    /// - `RunError::RetryExhausted` if the model stayed unavailable
    /// - `RunError::Client` for any other service error
    pub async fn run(&self, test_case: &TestCaseRef) -> Result<()> {
        let mut retries = 0;

        loop {
            time::sleep(self.wait).await;

            let operation = self.runs.submit_run(test_case).await?;
            debug!(
                test_case = %test_case.name,
                operation = %operation.name,
                attempt = retries + 1,
                "Run submitted"
            );

            match self.await_result(&operation).await {
                Ok(result) => return evaluate(test_case, &result),
                Err(err) if self.is_model_not_ready(&err) => {
                    retries += 1;
                    warn!(
                        test_case = %test_case.display_name,
                        retries,
                        max_retries = self.max_retries,
                        "NLU model not ready"
                    );

                    if retries >= self.max_retries {
                        return Err(RunError::RetryExhausted { attempts: retries });
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Polls until the operation stops running
    async fn await_result(&self, operation: &Operation) -> dfcx_client::Result<RunResult> {
        loop {
            match self.runs.poll_operation(operation).await? {
                OperationPoll::Completed(result) => return Ok(result),
                OperationPoll::Running => {
                    debug!(operation = %operation.name, "Run still in progress");
                    time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn is_model_not_ready(&self, err: &ClientError) -> bool {
        err.not_found_message() == Some(self.not_ready_message.as_str())
    }
}

/// A run passes only with a PASSED status and no differences in any turn
fn evaluate(test_case: &TestCaseRef, result: &RunResult) -> Result<()> {
    let differences = result.differences_per_turn();

    for (turn, diffs) in differences.iter().enumerate() {
        for diff in diffs.iter() {
            info!(
                test_case = %test_case.display_name,
                turn = turn + 1,
                diff_type = %diff.diff_type,
                description = %diff.description,
                "Agent response differs"
            );
        }
    }

    let has_differences = differences.iter().any(|diffs| !diffs.is_empty());
    if result.test_result != TestResult::Passed || has_differences {
        warn!(
            test_case = %test_case.display_name,
            status = %result.test_result,
            has_differences,
            "Test case failed"
        );
        return Err(RunError::TestFailure {
            display_name: test_case.display_name.clone(),
        });
    }

    info!(test_case = %test_case.display_name, "Test case passed");
    Ok(())
}
