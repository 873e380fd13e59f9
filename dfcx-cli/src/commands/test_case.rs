//! Test case command handlers
//!
//! Handles listing, inspecting, creating, deleting and running test cases.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use dfcx_core::domain::result::TestResult;
use dfcx_core::domain::test_case::TestCase;
use dfcx_core::dto::turn::parse_turns;
use dfcx_runner::repository::{
    HttpRunRepository, HttpTestCaseRepository, RunRepository, TestCaseRepository,
};
use dfcx_runner::service::{TestCaseLifecycle, TestRunExecutor};
use dfcx_runner::{Config, RunError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::with_run_overrides;
use crate::id_resolver::resolve_test_case;
use crate::types::TestCaseSelector;

/// Test case subcommands
#[derive(Subcommand)]
pub enum TestCaseCommands {
    /// List all test cases of the agent
    List,
    /// Show a test case and its turns
    Get {
        /// Resource name, display name or unambiguous ID prefix
        id: String,
    },
    /// Create a test case from a turn file (adopts an existing one with the same name)
    Create {
        /// Display name of the test case
        #[arg(long)]
        display_name: String,

        /// JSON file listing the turns
        #[arg(long)]
        turns: PathBuf,

        /// Let the agent call its webhooks during the test
        #[arg(long)]
        webhook: bool,
    },
    /// Delete test cases
    Delete {
        /// Resource names, display names or unambiguous ID prefixes
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Run a test case and wait for the verdict
    Run {
        /// Resource name, display name or unambiguous ID prefix
        id: String,

        /// Seconds to wait before each run submission
        #[arg(long)]
        wait: Option<u64>,

        /// How many "model not ready" errors to tolerate
        #[arg(long)]
        max_retries: Option<u32>,

        /// Seconds between polls of the running operation
        #[arg(long)]
        poll_interval: Option<u64>,
    },
}

/// Handle test case commands
///
/// Routes test case subcommands to their respective handlers.
pub async fn handle_test_case_command(command: TestCaseCommands, config: &Config) -> Result<()> {
    let client = Arc::new(config.client());
    let test_cases: Arc<dyn TestCaseRepository> =
        Arc::new(HttpTestCaseRepository::new(Arc::clone(&client)));

    match command {
        TestCaseCommands::List => list_test_cases(test_cases.as_ref(), config).await,
        TestCaseCommands::Get { id } => get_test_case(test_cases.as_ref(), config, &id).await,
        TestCaseCommands::Create {
            display_name,
            turns,
            webhook,
        } => create_test_case(test_cases, config, &display_name, turns, webhook).await,
        TestCaseCommands::Delete { ids } => delete_test_cases(test_cases.as_ref(), config, ids).await,
        TestCaseCommands::Run {
            id,
            wait,
            max_retries,
            poll_interval,
        } => {
            let config = with_run_overrides(config, wait, max_retries, poll_interval)?;
            let runs: Arc<dyn RunRepository> = Arc::new(HttpRunRepository::new(client));
            run_test_case(test_cases.as_ref(), runs, &config, &id).await
        }
    }
}

/// List all test cases
async fn list_test_cases(repository: &dyn TestCaseRepository, config: &Config) -> Result<()> {
    let test_cases = repository.list_test_cases(&config.agent).await?;

    if test_cases.is_empty() {
        println!("{}", "No test cases found.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} test case(s):", test_cases.len()).bold()
        );
        println!();
        for test_case in test_cases {
            print_test_case_summary(&test_case);
        }
    }

    Ok(())
}

/// Get and display a single test case
async fn get_test_case(repository: &dyn TestCaseRepository, config: &Config, id: &str) -> Result<()> {
    let selector = TestCaseSelector::parse(id);
    let test_case = resolve_test_case(repository, &config.agent, &selector).await?;

    print_test_case_details(&test_case);

    Ok(())
}

/// Create a test case from a turn file
async fn create_test_case(
    repository: Arc<dyn TestCaseRepository>,
    config: &Config,
    display_name: &str,
    turns_path: PathBuf,
    webhook: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(&turns_path)
        .with_context(|| format!("Failed to read turn file {}", turns_path.display()))?;
    let turns = parse_turns(&content)
        .with_context(|| format!("Failed to parse turn file {}", turns_path.display()))?;

    let mut lifecycle = TestCaseLifecycle::from_config(config, repository);
    let test_case = lifecycle.initialize(display_name, &turns, webhook).await?;

    println!("{}", "✓ Test case ready!".green().bold());
    println!("  Name:  {}", test_case.name.cyan());
    println!("  Title: {}", test_case.display_name.bold());
    println!(
        "  Turns: {}",
        test_case
            .test_case_conversation_turns
            .len()
            .to_string()
            .dimmed()
    );

    Ok(())
}

/// Delete test cases
async fn delete_test_cases(
    repository: &dyn TestCaseRepository,
    config: &Config,
    ids: Vec<String>,
) -> Result<()> {
    let mut names = Vec::with_capacity(ids.len());
    for id in &ids {
        let selector = TestCaseSelector::parse(id);
        let test_case = resolve_test_case(repository, &config.agent, &selector).await?;
        names.push(test_case.name);
    }

    let count = names.len();
    repository
        .batch_delete_test_cases(&config.agent, names)
        .await?;

    println!(
        "{}",
        format!("✓ {} test case(s) deleted successfully!", count)
            .green()
            .bold()
    );

    Ok(())
}

/// Run a test case and report the verdict
async fn run_test_case(
    repository: &dyn TestCaseRepository,
    runs: Arc<dyn RunRepository>,
    config: &Config,
    id: &str,
) -> Result<()> {
    let selector = TestCaseSelector::parse(id);
    let test_case = resolve_test_case(repository, &config.agent, &selector).await?;

    println!(
        "{} {} (waiting {:?} before each attempt, up to {} retries)",
        "▸ Running".cyan(),
        test_case.display_name.bold(),
        config.run_wait,
        config.max_retries
    );

    let executor = TestRunExecutor::from_config(config, runs);
    match executor.run(&test_case.reference()).await {
        Ok(()) => {
            println!("{}", "✓ Test case passed".green().bold());
            Ok(())
        }
        Err(err @ RunError::TestFailure { .. }) => {
            println!("{}", format!("✗ {}", err).red().bold());
            Err(err.into())
        }
        Err(err) => Err(err).context("Test case run did not complete"),
    }
}

/// Print a test case summary
fn print_test_case_summary(test_case: &TestCase) {
    println!("  {} {}", "▸".cyan(), test_case.display_name.bold());
    println!("    ID:      {}", test_case.id().dimmed());
    if let Some(created) = test_case.creation_time {
        println!(
            "    Created: {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    if let Some(last) = &test_case.last_test_result {
        println!("    Last:    {}", colorize_result(last.test_result));
    }
    println!();
}

/// Print detailed test case information
fn print_test_case_details(test_case: &TestCase) {
    println!("{}", "Test Case Details:".bold());
    println!("  Name:     {}", test_case.name.cyan());
    println!("  Title:    {}", test_case.display_name.bold());
    if !test_case.tags.is_empty() {
        println!("  Tags:     {}", test_case.tags.join(", "));
    }
    if let Some(test_config) = &test_case.test_config {
        println!("  Flow:     {}", test_config.flow);
    }
    if let Some(last) = &test_case.last_test_result {
        println!("  Last run: {}", colorize_result(last.test_result));
    }

    println!("\n{}", "Turns:".bold());
    println!("{}", "─".repeat(80).dimmed());
    for (idx, turn) in test_case.test_case_conversation_turns.iter().enumerate() {
        let said = turn
            .user_input
            .input
            .text
            .as_ref()
            .map(|t| t.text.as_str())
            .unwrap_or("<non-text input>");
        println!("{:>3}. {} {}", idx + 1, "user:".cyan(), said);

        for response in &turn.virtual_agent_output.text_responses {
            println!("     {} {}", "agent:".green(), response.text.join(" "));
        }
        if let Some(page) = &turn.virtual_agent_output.current_page {
            println!("     {} {}", "page:".dimmed(), page.display_name);
        }
    }
    println!("{}", "─".repeat(80).dimmed());
}

/// Colorize a run result for display
fn colorize_result(result: TestResult) -> ColoredString {
    let text = result.to_string();
    match result {
        TestResult::Passed => text.green(),
        TestResult::Failed => text.red(),
        TestResult::TestResultUnspecified => text.yellow(),
    }
}
