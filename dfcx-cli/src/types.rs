//! Common types used across CLI modules

/// How the user designated a test case on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestCaseSelector {
    /// Full resource name (`projects/.../testCases/<id>`)
    Name(String),
    /// Display name, or an unambiguous prefix of the trailing id
    Lookup(String),
}

impl TestCaseSelector {
    /// Parse a command-line argument
    ///
    /// Anything that looks like a resource name is taken verbatim; everything
    /// else has to be looked up among the agent's test cases.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.starts_with("projects/") && input.contains("/testCases/") {
            TestCaseSelector::Name(input.to_string())
        } else {
            TestCaseSelector::Lookup(input.to_string())
        }
    }
}

impl std::fmt::Display for TestCaseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCaseSelector::Name(name) => write!(f, "{}", name),
            TestCaseSelector::Lookup(query) => write!(f, "{}", query),
        }
    }
}

impl From<&str> for TestCaseSelector {
    fn from(s: &str) -> Self {
        TestCaseSelector::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector() {
        assert_eq!(
            TestCaseSelector::parse("projects/p/locations/global/agents/a/testCases/t1"),
            TestCaseSelector::Name("projects/p/locations/global/agents/a/testCases/t1".to_string())
        );
        assert_eq!(
            TestCaseSelector::parse(" greeting "),
            TestCaseSelector::Lookup("greeting".to_string())
        );
        assert_eq!(
            TestCaseSelector::parse("projects/p/locations/global/agents/a"),
            TestCaseSelector::Lookup("projects/p/locations/global/agents/a".to_string())
        );
    }
}
