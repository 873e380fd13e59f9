//! dfcx CLI
//!
//! Command-line interface for managing and running Dialogflow CX test cases.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dfcx")]
#[command(about = "Dialogflow CX test case CLI", long_about = None)]
struct Cli {
    /// Agent resource name (projects/<p>/locations/<l>/agents/<id>)
    #[arg(long, env = "DFCX_AGENT")]
    agent: String,

    /// API endpoint (defaults to the agent's regional endpoint)
    #[arg(long, env = "DFCX_ENDPOINT")]
    endpoint: Option<String>,

    /// OAuth access token
    #[arg(long, env = "DFCX_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Id of the flow test cases start in (defaults to the agent's start flow)
    #[arg(long, env = "DFCX_START_FLOW")]
    start_flow: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dfcx_runner=info,dfcx_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::build_config(
        &cli.agent,
        &config::GlobalOptions {
            endpoint: cli.endpoint.as_deref(),
            access_token: cli.access_token.as_deref(),
            start_flow: cli.start_flow.as_deref(),
        },
    )?;

    handle_command(cli.command, &config).await
}
