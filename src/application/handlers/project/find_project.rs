//! FindProjectHandler - Query handler for name-based project lookup.

use std::sync::Arc;

use crate::domain::foundation::ProjectName;
use crate::domain::project::{Project, ProjectError};
use crate::ports::ProjectRepository;

/// Query to find a project by exact name.
#[derive(Debug, Clone)]
pub struct FindProjectQuery {
    pub name: ProjectName,
}

/// Handler for project lookup.
///
/// A missing project is an error here, never an empty project.
pub struct FindProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl FindProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: FindProjectQuery) -> Result<Project, ProjectError> {
        self.repository
            .find_by_name(&query.name)
            .await?
            .ok_or_else(|| ProjectError::not_found(query.name))
    }
}
