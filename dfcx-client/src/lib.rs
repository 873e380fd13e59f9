//! Dialogflow CX HTTP Client
//!
//! A small, type-safe HTTP client for the Dialogflow CX v3 test-case API.
//!
//! Only the endpoints needed to manage and run test cases are covered:
//! test-case CRUD, `:run`, and polling of the long-running operations a run
//! produces.
//!
//! # Example
//!
//! ```no_run
//! use dfcx_client::{DialogflowClient, endpoint_for_agent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let agent = "projects/demo/locations/global/agents/1234";
//!     let client = DialogflowClient::new(endpoint_for_agent(agent)).with_access_token("ya29.token");
//!
//!     for test_case in client.list_all_test_cases(agent).await? {
//!         println!("{}: {}", test_case.display_name, test_case.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod operations;
mod test_cases;

// Re-export commonly used types
pub use error::{ClientError, Result};

use dfcx_core::domain::test_case::location_of;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Global Dialogflow endpoint
pub const DEFAULT_ENDPOINT: &str = "https://dialogflow.googleapis.com";

/// API version prefix of every resource path
const API_VERSION: &str = "v3";

/// HTTP client for the Dialogflow CX API
///
/// Methods are grouped by resource:
/// - Test cases (create, list, get, batch delete, run)
/// - Operations (get, poll)
#[derive(Debug, Clone)]
pub struct DialogflowClient {
    /// Base URL of the API (e.g., "https://dialogflow.googleapis.com")
    base_url: String,
    /// OAuth access token sent as a bearer token, if any
    access_token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl DialogflowClient {
    /// Create a new client for the given endpoint
    ///
    /// # Example
    /// ```
    /// use dfcx_client::DialogflowClient;
    ///
    /// let client = DialogflowClient::new("https://dialogflow.googleapis.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            client,
        }
    }

    /// Authenticate every request with an OAuth access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a resource (or of a custom method on it, e.g. `<name>:run`)
    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            API_VERSION,
            resource.trim_start_matches('/')
        )
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error::error_message(&body);
        tracing::debug!(status = status.as_u16(), %message, "Dialogflow API error");

        Err(ClientError::from_status(status.as_u16(), message))
    }
}

/// Endpoint serving an agent, derived from its location
pub fn endpoint_for_agent(agent: &str) -> String {
    match location_of(agent) {
        Some(location) if location != "global" => {
            format!("https://{}-dialogflow.googleapis.com", location)
        }
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DialogflowClient::new("https://dialogflow.googleapis.com");
        assert_eq!(client.base_url(), "https://dialogflow.googleapis.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = DialogflowClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_resource_url() {
        let client = DialogflowClient::new("http://localhost:8080");
        assert_eq!(
            client.resource_url("projects/p/locations/global/agents/a/testCases/t:run"),
            "http://localhost:8080/v3/projects/p/locations/global/agents/a/testCases/t:run"
        );
    }

    #[test]
    fn test_regional_endpoint() {
        assert_eq!(
            endpoint_for_agent("projects/p/locations/europe-west1/agents/a"),
            "https://europe-west1-dialogflow.googleapis.com"
        );
        assert_eq!(
            endpoint_for_agent("projects/p/locations/global/agents/a"),
            DEFAULT_ENDPOINT
        );
        assert_eq!(endpoint_for_agent("not-an-agent"), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_empty_access_token_is_ignored() {
        let client = DialogflowClient::new("http://localhost").with_access_token("");
        assert!(client.access_token.is_none());
    }
}
