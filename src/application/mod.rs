//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create, update, delete) are kept apart from query
//! handlers (find project, list issues).

pub mod handlers;

pub use handlers::issue::{
    CreateIssueCommand, CreateIssueHandler, DeleteIssueCommand, DeleteIssueHandler,
    ListIssuesHandler, ListIssuesQuery, UpdateIssueCommand, UpdateIssueHandler,
};
pub use handlers::project::{FindProjectHandler, FindProjectQuery};
