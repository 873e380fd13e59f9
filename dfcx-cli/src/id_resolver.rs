//! ID resolver module
//!
//! Resolves what the user typed (resource name, display name or id prefix)
//! to a single test case of the agent.

use anyhow::{Context, Result, anyhow};
use dfcx_core::domain::test_case::TestCase;
use dfcx_runner::repository::TestCaseRepository;

use crate::types::TestCaseSelector;

/// Resolve a selector to a test case
///
/// Resource names are fetched directly. Anything else is matched against the
/// agent's test cases, first by exact display name, then by id prefix.
///
/// # Errors
/// Returns an error if:
/// - No test case matches
/// - Several test cases match (ambiguous)
/// - API call fails
pub async fn resolve_test_case(
    repository: &dyn TestCaseRepository,
    agent: &str,
    selector: &TestCaseSelector,
) -> Result<TestCase> {
    let query = match selector {
        TestCaseSelector::Name(name) => {
            return repository
                .get_test_case(name)
                .await
                .with_context(|| format!("Failed to fetch test case {}", name));
        }
        TestCaseSelector::Lookup(query) => query,
    };

    let test_cases = repository
        .list_test_cases(agent)
        .await
        .context("Failed to fetch test cases for ID resolution")?;

    match_test_case(&test_cases, query).cloned()
}

/// Pick the one test case `query` designates
pub fn match_test_case<'a>(test_cases: &'a [TestCase], query: &str) -> Result<&'a TestCase> {
    let by_display_name: Vec<_> = test_cases
        .iter()
        .filter(|t| t.display_name == query)
        .collect();
    if let [test_case] = by_display_name.as_slice() {
        return Ok(*test_case);
    }

    let prefix = query.to_lowercase();
    let matches: Vec<_> = test_cases
        .iter()
        .filter(|t| t.id().to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(anyhow!(
            "No test case named '{}' or with ID starting with '{}'",
            query,
            prefix
        )),
        1 => Ok(matches[0]),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|t| t.id()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple test cases: {}",
                prefix,
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_case(id: &str, display_name: &str) -> TestCase {
        TestCase {
            name: format!("projects/p/locations/global/agents/a/testCases/{}", id),
            display_name: display_name.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<TestCase> {
        vec![
            test_case("ab12", "greeting"),
            test_case("ab34", "farewell"),
            test_case("cd56", "ab12"),
        ]
    }

    #[test]
    fn test_display_name_wins() {
        let test_cases = catalog();
        assert_eq!(match_test_case(&test_cases, "ab12").unwrap().id(), "cd56");
        assert_eq!(match_test_case(&test_cases, "farewell").unwrap().id(), "ab34");
    }

    #[test]
    fn test_unique_prefix() {
        let test_cases = catalog();
        assert_eq!(match_test_case(&test_cases, "AB3").unwrap().id(), "ab34");
    }

    #[test]
    fn test_ambiguous_prefix() {
        let test_cases = catalog();
        let err = match_test_case(&test_cases, "ab").unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));
    }

    #[test]
    fn test_no_match() {
        let test_cases = catalog();
        assert!(match_test_case(&test_cases, "zz").is_err());
    }
}
