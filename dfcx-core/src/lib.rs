//! dfcx Core
//!
//! Core types for the Dialogflow CX test-case tooling.
//!
//! This crate contains:
//! - Domain types: test cases, conversation turns, run results and long-running operations
//! - DTOs: request/response bodies of the test-case endpoints and the turn file format

pub mod domain;
pub mod dto;
