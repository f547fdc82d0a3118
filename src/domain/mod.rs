//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `issue` - Issue entity, creation defaults, partial updates
//! - `project` - Project aggregate and issue-list filtering

pub mod foundation;
pub mod issue;
pub mod project;
