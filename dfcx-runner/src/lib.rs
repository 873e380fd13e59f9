//! dfcx Runner
//!
//! Runs Dialogflow CX test cases and manages their lifecycle.
//!
//! Architecture:
//! - Configuration: agent, endpoint and run timings from environment or defaults
//! - Repositories: the remote test-case service behind traits (HTTP implementations over `dfcx-client`)
//! - Services: run execution with retry on transient "model not ready" errors,
//!   and test-case creation/tear-down
//!
//! The executor never creates or deletes test cases; that is the lifecycle's job.

pub mod config;
pub mod error;
pub mod repository;
pub mod service;

pub use config::Config;
pub use error::{Result, RunError};
