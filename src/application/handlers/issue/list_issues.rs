//! ListIssuesHandler - Query handler for a project's (filtered) issue list.

use std::sync::Arc;

use crate::application::handlers::project::{FindProjectHandler, FindProjectQuery};
use crate::domain::foundation::ProjectName;
use crate::domain::issue::Issue;
use crate::domain::project::{IssueFilter, ProjectError};
use crate::ports::ProjectRepository;

/// Query for the issues of one project.
#[derive(Debug, Clone)]
pub struct ListIssuesQuery {
    pub project: ProjectName,
    /// Empty filter returns every issue.
    pub filter: IssueFilter,
}

/// Handler for listing issues.
pub struct ListIssuesHandler {
    projects: FindProjectHandler,
}

impl ListIssuesHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            projects: FindProjectHandler::new(repository),
        }
    }

    pub async fn handle(&self, query: ListIssuesQuery) -> Result<Vec<Issue>, ProjectError> {
        let project = self
            .projects
            .handle(FindProjectQuery {
                name: query.project,
            })
            .await?;

        if query.filter.is_empty() {
            return Ok(project.into_issues());
        }
        Ok(query.filter.apply(project.issues()))
    }
}
