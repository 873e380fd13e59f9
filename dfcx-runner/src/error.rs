//! Error types for test runs and test-case lifecycle

use dfcx_client::ClientError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunError>;

#[derive(Debug, Error)]
pub enum RunError {
    /// The run completed but the test did not pass
    #[error("Test \"{display_name}\" failed")]
    TestFailure { display_name: String },

    /// The "model not ready" condition outlasted the retry budget
    #[error("Retry count exceeded: {attempts}")]
    RetryExhausted { attempts: u32 },

    /// The lifecycle holds no test case yet
    #[error("Test Case not yet created")]
    NotInitialized,

    /// Any other error reported by the remote service
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl RunError {
    /// Whether the test itself failed, as opposed to the infrastructure
    pub fn is_test_failure(&self) -> bool {
        matches!(self, Self::TestFailure { .. })
    }
}
