//! Configuration module
//!
//! Turns the global command-line flags into the runner configuration.
//! Flags win over `DFCX_*` environment variables, which win over defaults.

use anyhow::Result;
use dfcx_runner::Config;
use std::time::Duration;

/// Global flags that shape the runner configuration
#[derive(Debug, Default)]
pub struct GlobalOptions<'a> {
    pub endpoint: Option<&'a str>,
    pub access_token: Option<&'a str>,
    pub start_flow: Option<&'a str>,
}

/// Builds and validates the runner configuration for a CLI invocation
pub fn build_config(agent: &str, options: &GlobalOptions<'_>) -> Result<Config> {
    let mut config = Config::new(agent).with_env_overrides();

    if let Some(endpoint) = options.endpoint {
        config = config.with_endpoint(endpoint);
    }

    if let Some(token) = options.access_token {
        config = config.with_access_token(token);
    }

    if let Some(flow) = options.start_flow {
        config = config.with_start_flow(flow);
    }

    config.validate()?;
    Ok(config)
}

/// Applies the timing flags of `test-case run` and revalidates
pub fn with_run_overrides(
    config: &Config,
    wait: Option<u64>,
    max_retries: Option<u32>,
    poll_interval: Option<u64>,
) -> Result<Config> {
    let mut config = config.clone();

    if let Some(wait) = wait {
        config.run_wait = Duration::from_secs(wait);
    }

    if let Some(max_retries) = max_retries {
        config.max_retries = max_retries;
    }

    if let Some(interval) = poll_interval {
        config.poll_interval = Duration::from_secs(interval);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const AGENT: &str = "projects/p/locations/global/agents/a";

    #[test]
    #[serial]
    fn test_build_config() {
        let config = build_config(
            AGENT,
            &GlobalOptions {
                endpoint: Some("http://localhost:9000"),
                access_token: Some("token"),
                start_flow: Some("flow-1"),
            },
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.access_token.as_deref(), Some("token"));
        assert_eq!(config.start_flow_name(), format!("{}/flows/flow-1", AGENT));
    }

    #[test]
    #[serial]
    fn test_build_config_reads_environment() {
        // SAFETY: serialized with every other test touching the environment
        unsafe {
            std::env::set_var("DFCX_START_FLOW", "11111111-1111-1111-1111-111111111111");
            std::env::set_var("DFCX_MAX_RETRIES", "7");
            std::env::set_var("DFCX_RUN_WAIT", "0");
        }

        let from_env = build_config(AGENT, &GlobalOptions::default());
        let flag_wins = build_config(
            AGENT,
            &GlobalOptions {
                start_flow: Some("flag-flow"),
                ..Default::default()
            },
        );

        unsafe {
            std::env::remove_var("DFCX_START_FLOW");
            std::env::remove_var("DFCX_MAX_RETRIES");
            std::env::remove_var("DFCX_RUN_WAIT");
        }

        let config = from_env.unwrap();
        assert_eq!(config.start_flow, "11111111-1111-1111-1111-111111111111");
        assert_eq!(config.max_retries, 7);
        assert_eq!(config.run_wait, Duration::ZERO);

        assert_eq!(flag_wins.unwrap().start_flow, "flag-flow");
    }

    #[test]
    #[serial]
    fn test_build_config_rejects_bad_agent() {
        assert!(build_config("my-agent", &GlobalOptions::default()).is_err());
    }

    #[test]
    fn test_run_overrides() {
        let config = Config::new(AGENT);

        let overridden = with_run_overrides(&config, Some(2), Some(5), Some(3)).unwrap();
        assert_eq!(overridden.run_wait, Duration::from_secs(2));
        assert_eq!(overridden.max_retries, 5);
        assert_eq!(overridden.poll_interval, Duration::from_secs(3));

        let untouched = with_run_overrides(&config, None, None, None).unwrap();
        assert_eq!(untouched.max_retries, config.max_retries);
    }

    #[test]
    fn test_run_overrides_reject_zero_poll_interval() {
        let config = Config::new(AGENT);
        assert!(with_run_overrides(&config, None, None, Some(0)).is_err());
    }
}
