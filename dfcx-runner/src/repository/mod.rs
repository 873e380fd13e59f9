//! Repository layer
//!
//! Repositories are thin adapters over the Dialogflow client. They expose
//! the two narrow views of the remote test-case service the services need:
//! running test cases, and managing them.
//!
//! All repositories are trait-based to enable testing with in-memory fakes.

mod runs;
mod test_cases;

// Re-export traits
pub use runs::RunRepository;
pub use test_cases::TestCaseRepository;

// Re-export implementations
pub use runs::HttpRunRepository;
pub use test_cases::HttpTestCaseRepository;
