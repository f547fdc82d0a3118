//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod issue;
pub mod project;
