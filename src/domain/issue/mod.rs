//! Issue module - the tracked work item and its mutation rules.

mod aggregate;
mod errors;
mod fields;
mod patch;

pub use aggregate::{Issue, IssueDraft};
pub use errors::IssueError;
pub use fields::{FieldValue, IssueField};
pub use patch::IssuePatch;
