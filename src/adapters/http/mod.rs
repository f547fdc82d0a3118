//! HTTP adapters - REST API implementations.

pub mod issues;

pub use issues::{issues_router, IssuesAppState};
