//! Data Transfer Objects
//!
//! Request and response bodies of the test-case endpoints, plus the
//! human-written turn file format the CLI turns into conversation turns.

pub mod test_case;
pub mod turn;
