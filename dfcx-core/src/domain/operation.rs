//! Long-running operation domain types
//!
//! Running a test case does not answer synchronously: the service returns an
//! `Operation` that is polled by name until `done` is set, at which point it
//! carries either an `error` status or the run `response`.

use serde::{Deserialize, Serialize};

use crate::domain::result::RunResult;

/// `google.rpc.Code.NOT_FOUND`
pub const NOT_FOUND_CODE: i32 = 5;

/// Handle of an in-flight run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<RunTestCaseResponse>,
}

impl Operation {
    pub fn is_running(&self) -> bool {
        !self.done
    }
}

/// Error status of a finished operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTestCaseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RunResult>,
}

/// What a single poll of an operation observed
#[derive(Debug, Clone, PartialEq)]
pub enum OperationPoll {
    /// The run has not finished yet
    Running,
    /// The run finished and produced a result
    Completed(RunResult),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::TestResult;

    #[test]
    fn test_operation_in_progress() {
        let op: Operation = serde_json::from_value(serde_json::json!({
            "name": "projects/p/locations/global/operations/op-1"
        }))
        .unwrap();

        assert!(op.is_running());
        assert!(op.error.is_none());
        assert!(op.response.is_none());
    }

    #[test]
    fn test_finished_operation_with_result() {
        let op: Operation = serde_json::from_value(serde_json::json!({
            "name": "projects/p/locations/global/operations/op-1",
            "done": true,
            "response": {
                "@type": "type.googleapis.com/google.cloud.dialogflow.cx.v3.RunTestCaseResponse",
                "result": { "testResult": "FAILED" }
            }
        }))
        .unwrap();

        assert!(!op.is_running());
        let result = op.response.and_then(|r| r.result).unwrap();
        assert_eq!(result.test_result, TestResult::Failed);
    }
}
