//! DeleteIssueHandler - Command handler for removing an issue.

use std::sync::Arc;

use crate::domain::foundation::IssueId;
use crate::domain::issue::{Issue, IssueError};
use crate::ports::ProjectRepository;

/// Command to delete an issue by id.
#[derive(Debug, Clone)]
pub struct DeleteIssueCommand {
    pub id: IssueId,
}

/// Handler for deleting issues.
pub struct DeleteIssueHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl DeleteIssueHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Returns the removed issue, or `None` when no issue has the id.
    pub async fn handle(&self, cmd: DeleteIssueCommand) -> Result<Option<Issue>, IssueError> {
        Ok(self.repository.delete_issue(&cmd.id).await?)
    }
}
