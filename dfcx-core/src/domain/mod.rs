//! Core domain types
//!
//! These types mirror the Dialogflow CX v3 REST resources the tooling touches.
//! They are shared between the HTTP client (wire format) and the runner
//! (result interpretation).

pub mod operation;
pub mod result;
pub mod test_case;
pub mod turn;
