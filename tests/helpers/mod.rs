//! Shared fixtures and assertions for the integration tests.

pub mod handle_assertions;
pub mod java_fixtures;
