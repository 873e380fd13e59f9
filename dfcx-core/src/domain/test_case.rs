//! Test case domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::RunResult;
use crate::domain::turn::ConversationTurn;

/// Id of the flow every agent starts in
pub const DEFAULT_START_FLOW_ID: &str = "00000000-0000-0000-0000-000000000000";

/// A test case stored by the remote agent
///
/// `name` is the full resource name
/// (`projects/<p>/locations/<l>/agents/<a>/testCases/<id>`) and is empty until
/// the service has created the test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_config: Option<TestConfig>,
    #[serde(default)]
    pub test_case_conversation_turns: Vec<ConversationTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_test_result: Option<RunResult>,
}

impl TestCase {
    /// Lightweight reference used to request runs and deletions
    pub fn reference(&self) -> TestCaseRef {
        TestCaseRef {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
        }
    }

    /// Trailing id segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }
}

/// Configuration a test case is run with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracking_parameters: Vec<String>,
    /// Flow resource name the conversation starts in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flow: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub page: String,
}

impl TestConfig {
    /// Start the conversation in the given flow
    pub fn for_flow(flow: impl Into<String>) -> Self {
        Self {
            flow: flow.into(),
            ..Default::default()
        }
    }
}

/// Opaque reference to an existing remote test case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRef {
    pub name: String,
    pub display_name: String,
}

impl TestCaseRef {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

impl std::fmt::Display for TestCaseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.name)
    }
}

/// Resource name of a flow within an agent
pub fn flow_name(agent: &str, flow_id: &str) -> String {
    format!("{}/flows/{}", agent.trim_end_matches('/'), flow_id)
}

/// Location segment of an agent resource name, `None` if the name is malformed
pub fn location_of(agent: &str) -> Option<&str> {
    let mut segments = agent.split('/');
    while let Some(segment) = segments.next() {
        if segment == "locations" {
            return segments.next().filter(|s| !s.is_empty());
        }
    }
    None
}
