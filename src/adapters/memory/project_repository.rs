//! In-Memory Project Repository Adapter
//!
//! Keeps project documents in a map behind an async lock.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, IssueId, ProjectName, Timestamp};
use crate::domain::issue::{Issue, IssuePatch};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// In-memory storage for project documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectName, Project>>>,
}

impl InMemoryProjectRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-loaded with projects
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let map = projects
            .into_iter()
            .map(|p| (p.name().clone(), p))
            .collect();
        Self {
            projects: Arc::new(RwLock::new(map)),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.projects.write().await.clear();
    }

    /// Get the number of stored projects
    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_name(&self, name: &ProjectName) -> Result<Option<Project>, DomainError> {
        Ok(self.projects.read().await.get(name).cloned())
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        self.projects
            .write()
            .await
            .insert(project.name().clone(), project.clone());
        Ok(())
    }

    async fn ensure_project(&self, name: &ProjectName) -> Result<bool, DomainError> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(name) {
            return Ok(false);
        }
        projects.insert(name.clone(), Project::new(name.clone()));
        Ok(true)
    }

    async fn issue_exists(&self, id: &IssueId) -> Result<bool, DomainError> {
        let projects = self.projects.read().await;
        Ok(projects.values().any(|p| p.contains_issue(id)))
    }

    async fn update_issue(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
        updated_on: Timestamp,
    ) -> Result<Option<Issue>, DomainError> {
        let mut projects = self.projects.write().await;
        let updated = projects
            .values_mut()
            .find_map(|p| p.update_issue(id, patch, updated_on).cloned());
        Ok(updated)
    }

    async fn delete_issue(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        let mut projects = self.projects.write().await;
        let removed = projects.values_mut().find_map(|p| p.remove_issue(id));
        Ok(removed)
    }
}
