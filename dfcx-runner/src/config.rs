//! Runner configuration
//!
//! Defines the agent under test, how to reach the Dialogflow API and the
//! timings of test runs.

use std::time::Duration;

use dfcx_client::{DialogflowClient, endpoint_for_agent};
use dfcx_core::domain::test_case::{DEFAULT_START_FLOW_ID, flow_name, location_of};

/// Runner configuration
///
/// Timings are configurable because a freshly created or updated test case
/// is not reliably runnable right away.
#[derive(Debug, Clone)]
pub struct Config {
    /// Agent resource name (`projects/<p>/locations/<l>/agents/<a>`)
    pub agent: String,

    /// API base URL; derived from the agent's location unless overridden
    pub endpoint: String,

    /// OAuth access token for the API
    pub access_token: Option<String>,

    /// Id of the flow test cases start in
    pub start_flow: String,

    /// Delay before each run submission
    pub run_wait: Duration,

    /// Delay between polls of a still-running operation
    pub poll_interval: Duration,

    /// How many "model not ready" errors a run tolerates
    pub max_retries: u32,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(agent: impl Into<String>) -> Self {
        let agent = agent.into();
        Self {
            endpoint: endpoint_for_agent(&agent),
            agent,
            access_token: None,
            start_flow: DEFAULT_START_FLOW_ID.to_string(),
            run_wait: Duration::from_secs(10),
            poll_interval: Duration::from_secs(1),
            max_retries: 3,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DFCX_AGENT (required)
    /// - DFCX_ENDPOINT (optional, default: derived from the agent location)
    /// - DFCX_ACCESS_TOKEN (optional)
    /// - DFCX_START_FLOW (optional, default: the default start flow)
    /// - DFCX_RUN_WAIT (optional, seconds, default: 10)
    /// - DFCX_POLL_INTERVAL (optional, seconds, default: 1)
    /// - DFCX_MAX_RETRIES (optional, default: 3)
    pub fn from_env() -> anyhow::Result<Self> {
        let agent = std::env::var("DFCX_AGENT")
            .map_err(|_| anyhow::anyhow!("DFCX_AGENT environment variable not set"))?;

        Ok(Self::new(agent).with_env_overrides())
    }

    /// Applies the optional `DFCX_*` variables on top of this configuration
    ///
    /// `DFCX_AGENT` is left alone so callers that take the agent from
    /// elsewhere keep it.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("DFCX_ENDPOINT") {
            self.endpoint = endpoint;
        }

        if let Some(token) = std::env::var("DFCX_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
        {
            self.access_token = Some(token);
        }

        if let Ok(flow) = std::env::var("DFCX_START_FLOW") {
            self.start_flow = flow;
        }

        if let Some(wait) = env_u64("DFCX_RUN_WAIT") {
            self.run_wait = Duration::from_secs(wait);
        }

        if let Some(interval) = env_u64("DFCX_POLL_INTERVAL") {
            self.poll_interval = Duration::from_secs(interval);
        }

        if let Some(retries) = env_u64("DFCX_MAX_RETRIES") {
            self.max_retries = u32::try_from(retries).unwrap_or(u32::MAX);
        }

        self
    }

    /// Sets the id of the flow test cases start in
    pub fn with_start_flow(mut self, flow_id: impl Into<String>) -> Self {
        self.start_flow = flow_id.into();
        self
    }

    /// Overrides the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the OAuth access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    /// Resource name of the start flow
    pub fn start_flow_name(&self) -> String {
        flow_name(&self.agent, &self.start_flow)
    }

    /// Builds an API client from this configuration
    pub fn client(&self) -> DialogflowClient {
        let client = DialogflowClient::new(self.endpoint.clone());
        match &self.access_token {
            Some(token) => client.with_access_token(token.clone()),
            None => client,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.agent.is_empty() {
            anyhow::bail!("agent cannot be empty");
        }

        if !self.agent.starts_with("projects/")
            || !self.agent.contains("/agents/")
            || location_of(&self.agent).is_none()
        {
            anyhow::bail!("agent must look like projects/<project>/locations/<location>/agents/<id>");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("endpoint must start with http:// or https://");
        }

        if self.start_flow.is_empty() {
            anyhow::bail!("start_flow cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.parse::<u64>().ok())
}
