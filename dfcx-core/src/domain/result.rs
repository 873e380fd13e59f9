//! Run result domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::turn::{ConversationTurn, Difference};

/// Outcome of one test case run (`TestCaseResult` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
    #[serde(default)]
    pub conversation_turns: Vec<ConversationTurn>,
    #[serde(default)]
    pub test_result: TestResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_time: Option<DateTime<Utc>>,
}

impl RunResult {
    /// Recorded differences of every turn, in turn order
    pub fn differences_per_turn(&self) -> Vec<&[Difference]> {
        self.conversation_turns
            .iter()
            .map(ConversationTurn::differences)
            .collect()
    }
}

/// Status the service assigned to a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestResult {
    Passed,
    Failed,
    #[default]
    #[serde(other)]
    TestResultUnspecified,
}

impl std::fmt::Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestResult::TestResultUnspecified => write!(f, "Unspecified"),
            TestResult::Passed => write!(f, "Passed"),
            TestResult::Failed => write!(f, "Failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_parses_and_collects_differences() {
        let result: RunResult = serde_json::from_value(serde_json::json!({
            "name": "projects/p/locations/global/agents/a/testCases/t/results/r",
            "testResult": "PASSED",
            "testTime": "2024-05-01T10:00:00Z",
            "conversationTurns": [
                { "virtualAgentOutput": {} },
                { "virtualAgentOutput": { "differences": [ { "type": "PAGE", "description": "Page mismatch" } ] } }
            ]
        }))
        .unwrap();

        assert_eq!(result.test_result, TestResult::Passed);
        let differences = result.differences_per_turn();
        assert_eq!(differences.len(), 2);
        assert!(differences[0].is_empty());
        assert_eq!(differences[1][0].description, "Page mismatch");
    }

    #[test]
    fn test_missing_status_is_unspecified() {
        let result: RunResult = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(result.test_result, TestResult::TestResultUnspecified);
        assert!(result.differences_per_turn().is_empty());
    }

    #[test]
    fn test_status_wire_names() {
        let parse = |status: &str| -> TestResult {
            serde_json::from_value(serde_json::json!(status)).unwrap()
        };

        assert_eq!(parse("PASSED"), TestResult::Passed);
        assert_eq!(parse("FAILED"), TestResult::Failed);
        assert_eq!(parse("TEST_RESULT_UNSPECIFIED"), TestResult::TestResultUnspecified);
        assert_eq!(parse("SOMETHING_NEW"), TestResult::TestResultUnspecified);
    }
}
