//! Service layer
//!
//! Services hold the run and lifecycle logic. They talk to the remote
//! service only through the repository traits.

mod executor;
mod lifecycle;

pub use executor::{TestRunExecutor, model_not_ready_message};
pub use lifecycle::TestCaseLifecycle;
