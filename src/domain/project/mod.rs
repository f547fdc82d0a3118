//! Project module - named issue containers and issue-list filtering.

mod aggregate;
mod errors;
mod filter;

pub use aggregate::Project;
pub use errors::ProjectError;
pub use filter::{Criterion, FilterKey, IssueFilter};
