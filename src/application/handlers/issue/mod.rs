//! Issue command and query handlers.

mod create_issue;
mod delete_issue;
mod list_issues;
mod update_issue;

pub use create_issue::{CreateIssueCommand, CreateIssueHandler};
pub use delete_issue::{DeleteIssueCommand, DeleteIssueHandler};
pub use list_issues::{ListIssuesHandler, ListIssuesQuery};
pub use update_issue::{UpdateIssueCommand, UpdateIssueHandler};
