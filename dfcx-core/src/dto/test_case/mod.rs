//! Test case DTOs

use serde::{Deserialize, Serialize};

use crate::domain::test_case::{TestCase, TestCaseRef};

/// Request to run a test case
///
/// The test case name travels in the URL (`<name>:run`); only the optional
/// environment is sent in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTestCaseRequest {
    #[serde(skip)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl RunTestCaseRequest {
    pub fn new(test_case: &TestCaseRef) -> Self {
        Self {
            name: test_case.name.clone(),
            environment: None,
        }
    }
}

/// One page of test cases
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTestCasesResponse {
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl ListTestCasesResponse {
    /// Token of the next page, `None` on the last page
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Request to delete several test cases of one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDeleteTestCasesRequest {
    pub names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_request_body_has_no_name() {
        let req = RunTestCaseRequest::new(&TestCaseRef::new(
            "projects/p/locations/global/agents/a/testCases/t",
            "greeting",
        ));

        assert_eq!(req.name, "projects/p/locations/global/agents/a/testCases/t");
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_last_page_detection() {
        let page: ListTestCasesResponse = serde_json::from_value(serde_json::json!({
            "testCases": [ { "name": "a/testCases/1", "displayName": "one" } ],
            "nextPageToken": ""
        }))
        .unwrap();

        assert_eq!(page.test_cases.len(), 1);
        assert_eq!(page.next_page(), None);
    }
}
