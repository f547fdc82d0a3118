//! Project repository port.
//!
//! Defines the contract for the document store holding projects and their
//! embedded issues. A project is always read and written as a whole document.
//!
//! # Design
//!
//! - **Document-shaped**: `save` replaces the entire project, issues included
//! - **Id-addressed issue ops**: `update_issue` and `delete_issue` find the
//!   owning project themselves, so callers need not know it
//! - **Globally unique issue ids**: an id is embedded in at most one project,
//!   which `issue_exists` lets callers check before appending
//! - **Whole-document saves**: concurrent `save` calls race; the last write wins

use crate::domain::foundation::{DomainError, IssueId, ProjectName, Timestamp};
use crate::domain::issue::{Issue, IssuePatch};
use crate::domain::project::Project;
use async_trait::async_trait;

/// Repository port for Project document persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by exact, case-sensitive name.
    ///
    /// Returns `None` if no such project exists.
    async fn find_by_name(&self, name: &ProjectName) -> Result<Option<Project>, DomainError>;

    /// Persist the whole project document, inserting it if new.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, project: &Project) -> Result<(), DomainError>;

    /// Create an empty project unless one with this name already exists.
    ///
    /// Returns `true` if a project was created.
    async fn ensure_project(&self, name: &ProjectName) -> Result<bool, DomainError>;

    /// Whether any project embeds an issue with this id.
    async fn issue_exists(&self, id: &IssueId) -> Result<bool, DomainError>;

    /// Merge a patch onto the issue with this id, in whichever project
    /// embeds it, stamping `updated_on`.
    ///
    /// Returns the updated issue, or `None` if no project embeds the id.
    async fn update_issue(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
        updated_on: Timestamp,
    ) -> Result<Option<Issue>, DomainError>;

    /// Remove the issue with this id from its owning project.
    ///
    /// Returns the removed issue, or `None` if no project embeds the id.
    async fn delete_issue(&self, id: &IssueId) -> Result<Option<Issue>, DomainError>;
}
