//! Conversation turn domain types
//!
//! A turn pairs what the user says with what the virtual agent is expected to
//! answer. When a run completes, the service echoes each turn back with the
//! `differences` it observed between expected and actual agent output.

use serde::{Deserialize, Serialize};

/// One user/agent exchange within a test case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(default)]
    pub user_input: UserInput,
    #[serde(default)]
    pub virtual_agent_output: VirtualAgentOutput,
}

impl ConversationTurn {
    /// Differences recorded for this turn (empty when the agent behaved as expected)
    pub fn differences(&self) -> &[Difference] {
        &self.virtual_agent_output.differences
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub input: QueryInput,
    #[serde(default)]
    pub is_webhook_enabled: bool,
    #[serde(default)]
    pub enable_sentiment_analysis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,
}

/// What the agent said (or is expected to say) in a turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualAgentOutput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<Difference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_intent: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_responses: Vec<TextResponse>,
}

/// Intent or page reference, by resource name and/or display name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextResponse {
    #[serde(default)]
    pub text: Vec<String>,
}

/// A mismatch between expected and actual agent output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    #[serde(rename = "type", default)]
    pub diff_type: DiffType,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffType {
    Intent,
    Page,
    Parameters,
    Utterance,
    Flow,
    #[default]
    #[serde(rename = "DIFF_TYPE_UNSPECIFIED")]
    #[serde(other)]
    Unspecified,
}

impl std::fmt::Display for DiffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffType::Intent => write!(f, "intent"),
            DiffType::Page => write!(f, "page"),
            DiffType::Parameters => write!(f, "parameters"),
            DiffType::Utterance => write!(f, "utterance"),
            DiffType::Flow => write!(f, "flow"),
            DiffType::Unspecified => write!(f, "unspecified"),
        }
    }
}
