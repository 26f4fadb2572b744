//! Integration test utilities for the bunpo backend
//!
//! Runs the real router against in-memory repositories and a fake Google
//! OAuth server, so no PostgreSQL instance or network access is needed.

pub mod fixtures;

pub use fixtures::*;
pub use helpers::*;
