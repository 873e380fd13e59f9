//! Turn file DTOs
//!
//! Test cases are authored as a short JSON list of turns:
//!
//! ```json
//! [
//!   { "user_input": "hi", "expected_responses": ["Hello! How can I help?"] },
//!   { "user_input": "book a table", "expected_page": "Booking" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::turn::{
    ConversationTurn, QueryInput, ResourceRef, TextInput, TextResponse, UserInput,
    VirtualAgentOutput,
};

/// Human-authored description of one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedTurn {
    pub user_input: String,
    #[serde(default)]
    pub expected_responses: Vec<String>,
    #[serde(default)]
    pub expected_intent: Option<String>,
    #[serde(default)]
    pub expected_page: Option<String>,
}

impl ExpectedTurn {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            expected_responses: Vec::new(),
            expected_intent: None,
            expected_page: None,
        }
    }

    pub fn expect_response(mut self, response: impl Into<String>) -> Self {
        self.expected_responses.push(response.into());
        self
    }

    /// Wire representation of this turn
    pub fn to_conversation_turn(&self, is_webhook_enabled: bool) -> ConversationTurn {
        let text_responses = if self.expected_responses.is_empty() {
            Vec::new()
        } else {
            vec![TextResponse {
                text: self.expected_responses.clone(),
            }]
        };

        ConversationTurn {
            user_input: UserInput {
                input: QueryInput {
                    text: Some(TextInput {
                        text: self.user_input.clone(),
                    }),
                    language_code: None,
                },
                is_webhook_enabled,
                enable_sentiment_analysis: false,
            },
            virtual_agent_output: VirtualAgentOutput {
                differences: Vec::new(),
                triggered_intent: self.expected_intent.as_ref().map(display_ref),
                current_page: self.expected_page.as_ref().map(display_ref),
                text_responses,
            },
        }
    }
}

fn display_ref(display_name: &String) -> ResourceRef {
    ResourceRef {
        name: String::new(),
        display_name: display_name.clone(),
    }
}

/// Parse a turn file
pub fn parse_turns(content: &str) -> serde_json::Result<Vec<ExpectedTurn>> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_turn_to_conversation_turn() {
        let expected = ExpectedTurn::new("hi").expect_response("Hello!");
        let turn = expected.to_conversation_turn(true);

        assert!(turn.user_input.is_webhook_enabled);
        assert_eq!(turn.user_input.input.text.as_ref().unwrap().text, "hi");
        assert_eq!(turn.virtual_agent_output.text_responses[0].text, vec!["Hello!"]);
        assert!(turn.virtual_agent_output.current_page.is_none());
        assert!(turn.differences().is_empty());
    }

    #[test]
    fn test_parse_turns() {
        let turns = parse_turns(
            r#"[
                { "user_input": "hi", "expected_responses": ["Hello!"] },
                { "user_input": "book", "expected_page": "Booking" }
            ]"#,
        )
        .unwrap();

        assert_eq!(turns.len(), 2);
        let second = turns[1].to_conversation_turn(false);
        assert_eq!(
            second.virtual_agent_output.current_page.unwrap().display_name,
            "Booking"
        );
        assert!(second.virtual_agent_output.text_responses.is_empty());
    }

    #[test]
    fn test_parse_turns_rejects_missing_input() {
        assert!(parse_turns(r#"[ { "expected_responses": ["x"] } ]"#).is_err());
    }
}
