//! UpdateIssueHandler - Command handler for partial issue updates.

use std::sync::Arc;

use crate::domain::foundation::{IssueId, Timestamp};
use crate::domain::issue::{Issue, IssueError, IssuePatch};
use crate::ports::ProjectRepository;

/// Command to merge a patch onto an issue.
#[derive(Debug, Clone)]
pub struct UpdateIssueCommand {
    pub id: IssueId,
    pub patch: IssuePatch,
    /// Stamp written to `updated_on`, chosen by the caller.
    pub updated_on: Timestamp,
}

/// Handler for updating issues.
///
/// The issue is looked up in whichever project embeds it.
pub struct UpdateIssueHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl UpdateIssueHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    /// Returns the updated issue, or `None` when no issue has the id.
    pub async fn handle(&self, cmd: UpdateIssueCommand) -> Result<Option<Issue>, IssueError> {
        let updated = self
            .repository
            .update_issue(&cmd.id, &cmd.patch, cmd.updated_on)
            .await?;
        Ok(updated)
    }
}
