//! CreateIssueHandler - Command handler for adding an issue to a project.

use std::sync::Arc;

use crate::application::handlers::project::{FindProjectHandler, FindProjectQuery};
use crate::domain::foundation::ProjectName;
use crate::domain::issue::{Issue, IssueDraft, IssueError};
use crate::ports::ProjectRepository;

/// Command to create an issue inside a project.
#[derive(Debug, Clone)]
pub struct CreateIssueCommand {
    pub project: ProjectName,
    pub draft: IssueDraft,
}

/// Handler for creating issues.
pub struct CreateIssueHandler {
    repository: Arc<dyn ProjectRepository>,
    projects: FindProjectHandler,
}

impl CreateIssueHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            projects: FindProjectHandler::new(repository.clone()),
            repository,
        }
    }

    pub async fn handle(&self, cmd: CreateIssueCommand) -> Result<Issue, IssueError> {
        // 1. Validate and build; nothing is stored on failure
        let issue = Issue::create(cmd.draft)?;

        // 2. Load owning project
        let mut project = self
            .projects
            .handle(FindProjectQuery { name: cmd.project })
            .await?;

        // 3. Ids are unique across every project, not just this one
        if self.repository.issue_exists(issue.id()).await? {
            return Err(IssueError::DuplicateId(*issue.id()));
        }

        // 4. Append and persist the whole document
        project.add_issue(issue.clone())?;
        self.repository.save(&project).await?;

        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::domain::foundation::{DomainError, IssueId, Timestamp};
    use crate::domain::issue::IssuePatch;
    use crate::domain::project::Project;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves one project but fails every save.
    struct ReadOnlyRepository {
        project: Project,
        saves: Mutex<u32>,
    }

    #[async_trait]
    impl ProjectRepository for ReadOnlyRepository {
        async fn find_by_name(&self, _name: &ProjectName) -> Result<Option<Project>, DomainError> {
            Ok(Some(self.project.clone()))
        }

        async fn save(&self, _project: &Project) -> Result<(), DomainError> {
            *self.saves.lock().unwrap() += 1;
            Err(DomainError::database("read-only"))
        }

        async fn ensure_project(&self, _name: &ProjectName) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn issue_exists(&self, _id: &IssueId) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn update_issue(
            &self,
            _id: &IssueId,
            _patch: &IssuePatch,
            _updated_on: Timestamp,
        ) -> Result<Option<Issue>, DomainError> {
            Ok(None)
        }

        async fn delete_issue(&self, _id: &IssueId) -> Result<Option<Issue>, DomainError> {
            Ok(None)
        }
    }

    fn name() -> ProjectName {
        ProjectName::new("apitest").unwrap()
    }

    fn draft() -> IssueDraft {
        IssueDraft {
            issue_title: Some("Required fields".to_string()),
            issue_text: Some("Testing required fields".to_string()),
            created_by: Some("Tester Required".to_string()),
            ..Default::default()
        }
    }

    fn seeded_repo() -> Arc<InMemoryProjectRepository> {
        Arc::new(InMemoryProjectRepository::with_projects([Project::new(name())]))
    }

    #[tokio::test]
    async fn creates_and_persists_issue() {
        let repo = seeded_repo();
        let handler = CreateIssueHandler::new(repo.clone());

        let issue = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: draft(),
            })
            .await
            .unwrap();

        assert!(issue.is_open());
        assert_eq!(issue.assigned_to(), "");
        assert_eq!(issue.status_text(), "");

        let stored = repo.find_by_name(&name()).await.unwrap().unwrap();
        assert_eq!(stored.issues(), &[issue]);
    }

    #[tokio::test]
    async fn appends_after_existing_issues() {
        let repo = seeded_repo();
        let handler = CreateIssueHandler::new(repo.clone());

        let first = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: draft(),
            })
            .await
            .unwrap();
        let second = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: draft(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_name(&name()).await.unwrap().unwrap();
        let ids: Vec<_> = stored.issues().iter().map(|i| *i.id()).collect();
        assert_eq!(ids, vec![*first.id(), *second.id()]);
    }

    #[tokio::test]
    async fn missing_field_persists_nothing() {
        let repo = seeded_repo();
        let handler = CreateIssueHandler::new(repo.clone());
        let mut incomplete = draft();
        incomplete.issue_text = None;

        let err = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: incomplete,
            })
            .await
            .unwrap_err();

        assert_eq!(err, IssueError::RequiredFieldsMissing);
        let stored = repo.find_by_name(&name()).await.unwrap().unwrap();
        assert!(stored.issues().is_empty());
    }

    #[tokio::test]
    async fn validation_runs_before_storage() {
        let repo = Arc::new(ReadOnlyRepository {
            project: Project::new(name()),
            saves: Mutex::new(0),
        });
        let handler = CreateIssueHandler::new(repo.clone());

        let err = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: IssueDraft::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, IssueError::RequiredFieldsMissing);
        assert_eq!(*repo.saves.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_project_is_reported() {
        let handler = CreateIssueHandler::new(Arc::new(InMemoryProjectRepository::new()));

        let err = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: draft(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, IssueError::ProjectNotFound(name()));
    }

    #[tokio::test]
    async fn duplicate_caller_id_is_rejected() {
        let repo = seeded_repo();
        let handler = CreateIssueHandler::new(repo);
        let id = IssueId::new();
        let mut with_id = draft();
        with_id.id = Some(id);

        handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: with_id.clone(),
            })
            .await
            .unwrap();
        let err = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: with_id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, IssueError::DuplicateId(id));
    }

    #[tokio::test]
    async fn caller_id_taken_in_another_project_is_rejected() {
        let other = ProjectName::new("other").unwrap();
        let repo = Arc::new(InMemoryProjectRepository::with_projects([
            Project::new(name()),
            Project::new(other.clone()),
        ]));
        let handler = CreateIssueHandler::new(repo.clone());
        let id = IssueId::new();
        let mut with_id = draft();
        with_id.id = Some(id);

        handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: with_id.clone(),
            })
            .await
            .unwrap();
        let err = handler
            .handle(CreateIssueCommand {
                project: other.clone(),
                draft: with_id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, IssueError::DuplicateId(id));
        let stored = repo.find_by_name(&other).await.unwrap().unwrap();
        assert!(stored.issues().is_empty());
    }

    #[tokio::test]
    async fn save_failure_is_infrastructure() {
        let repo = Arc::new(ReadOnlyRepository {
            project: Project::new(name()),
            saves: Mutex::new(0),
        });
        let handler = CreateIssueHandler::new(repo.clone());

        let err = handler
            .handle(CreateIssueCommand {
                project: name(),
                draft: draft(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, IssueError::Infrastructure(_)));
        assert_eq!(*repo.saves.lock().unwrap(), 1);
    }
}
