//! Shared helpers for integration tests.

pub mod http;
pub mod petri_env;
