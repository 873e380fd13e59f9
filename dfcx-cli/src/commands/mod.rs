//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod test_case;

pub use test_case::TestCaseCommands;

use anyhow::Result;
use clap::Subcommand;
use dfcx_runner::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Test case management and runs
    TestCase {
        #[command(subcommand)]
        command: TestCaseCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::TestCase { command } => test_case::handle_test_case_command(command, config).await,
    }
}
