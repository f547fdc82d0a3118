//! HTTP handlers for issue endpoints.
//!
//! Every outcome, including failures, is answered with status 200 and a JSON
//! body; existing clients branch on the `error` / `result` keys.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error, warn};

use crate::application::handlers::issue::{
    CreateIssueCommand, CreateIssueHandler, DeleteIssueCommand, DeleteIssueHandler,
    ListIssuesHandler, ListIssuesQuery, UpdateIssueCommand, UpdateIssueHandler,
};
use crate::domain::foundation::{IssueId, ProjectName, Timestamp};
use crate::domain::issue::IssueError;
use crate::domain::project::ProjectError;
use crate::ports::ProjectRepository;

use super::dto::{
    draft_from_query, filter_from_query, id_param, patch_from_query, ErrorResponse, QueryPairs,
    ResultResponse, COULD_NOT_CREATE, COULD_NOT_DELETE, COULD_NOT_UPDATE, DELETED,
    INVALID_FIELD_VALUE, INVALID_ID, MISSING_ID, NO_UPDATE_FIELDS, REQUIRED_FIELDS_MISSING,
    UPDATED,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state for the issue routes.
#[derive(Clone)]
pub struct IssuesAppState {
    pub repository: Arc<dyn ProjectRepository>,
    /// Deadline for one request's storage work; expiry folds into the
    /// verb's usual error body.
    pub storage_timeout: Duration,
}

impl IssuesAppState {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            repository,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Runs `work` under the storage deadline. `None` means it expired.
    async fn bounded<T>(&self, work: impl Future<Output = T>) -> Option<T> {
        tokio::time::timeout(self.storage_timeout, work).await.ok()
    }

    pub fn list_issues_handler(&self) -> ListIssuesHandler {
        ListIssuesHandler::new(self.repository.clone())
    }

    pub fn create_issue_handler(&self) -> CreateIssueHandler {
        CreateIssueHandler::new(self.repository.clone())
    }

    pub fn update_issue_handler(&self) -> UpdateIssueHandler {
        UpdateIssueHandler::new(self.repository.clone())
    }

    pub fn delete_issue_handler(&self) -> DeleteIssueHandler {
        DeleteIssueHandler::new(self.repository.clone())
    }
}

fn reply<T: serde::Serialize>(body: T) -> Response {
    Json(body).into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/issues/:project - List issues, optionally filtered by query params
pub async fn list_issues(
    State(state): State<IssuesAppState>,
    Path(project): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Response {
    debug!(project = %project, criteria = params.len(), "listing issues");

    let Ok(name) = ProjectName::new(&project) else {
        return reply(ErrorResponse::project_not_found(project));
    };
    let query = ListIssuesQuery {
        project: name,
        filter: filter_from_query(&params),
    };

    let handler = state.list_issues_handler();
    let Some(result) = state.bounded(handler.handle(query)).await else {
        warn!(project = %project, "project lookup timed out");
        return reply(ErrorResponse::project_not_found(project));
    };
    match result {
        Ok(issues) => reply(issues),
        Err(ProjectError::NotFound(_)) => {
            warn!(project = %project, "project not found");
            reply(ErrorResponse::project_not_found(project))
        }
        Err(err) => {
            error!(project = %project, code = %err.code(), error = %err, "failed to load project");
            reply(ErrorResponse::project_not_found(project))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST / PUT / DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/issues/:project - Create an issue from query params
pub async fn create_issue(
    State(state): State<IssuesAppState>,
    Path(project): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Response {
    debug!(project = %project, "creating issue");

    let draft = match draft_from_query(&params) {
        Ok(draft) => draft,
        Err(err) => return create_error(&project, err),
    };
    let Ok(name) = ProjectName::new(&project) else {
        return reply(ErrorResponse::project_not_found(project));
    };

    let cmd = CreateIssueCommand {
        project: name,
        draft,
    };
    let handler = state.create_issue_handler();
    let Some(result) = state.bounded(handler.handle(cmd)).await else {
        warn!(project = %project, "create timed out");
        return reply(ErrorResponse::new(COULD_NOT_CREATE));
    };
    match result {
        Ok(issue) => {
            debug!(project = %project, issue_id = %issue.id(), "issue created");
            reply(issue)
        }
        Err(err) => create_error(&project, err),
    }
}

fn create_error(project: &str, err: IssueError) -> Response {
    match err {
        IssueError::RequiredFieldsMissing => {
            debug!(project = %project, "create rejected: required field(s) missing");
            reply(ErrorResponse::new(REQUIRED_FIELDS_MISSING))
        }
        IssueError::InvalidId(raw) => {
            debug!(project = %project, id = %raw, "create rejected: invalid _id");
            reply(ErrorResponse::new(INVALID_ID).with_id(raw))
        }
        IssueError::InvalidFieldValue { field, value } => {
            debug!(project = %project, field = %field, value = %value, "create rejected");
            reply(ErrorResponse::new(INVALID_FIELD_VALUE).with_field(field))
        }
        IssueError::ProjectNotFound(name) => {
            warn!(project = %name, "project not found");
            reply(ErrorResponse::project_not_found(name.as_str()))
        }
        IssueError::DuplicateId(id) => {
            warn!(project = %project, issue_id = %id, "duplicate issue id");
            reply(ErrorResponse::new(COULD_NOT_CREATE).with_id(id.to_string()))
        }
        other => {
            error!(project = %project, code = %other.code(), error = %other, "failed to create issue");
            reply(ErrorResponse::new(COULD_NOT_CREATE))
        }
    }
}

/// PUT /api/issues/:project - Merge query params onto the issue named by `_id`
///
/// The issue is located by id alone; the path segment is only logged.
pub async fn update_issue(
    State(state): State<IssuesAppState>,
    Path(project): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Response {
    let Some(raw_id) = id_param(&params) else {
        return reply(ErrorResponse::new(MISSING_ID));
    };
    debug!(project = %project, id = %raw_id, "updating issue");

    if params.len() == 1 {
        return reply(ErrorResponse::new(NO_UPDATE_FIELDS).with_id(raw_id));
    }

    let patch = match patch_from_query(&params) {
        Ok(patch) => patch,
        Err(err) => {
            debug!(id = %raw_id, error = %err, "update rejected");
            return reply(ErrorResponse::new(COULD_NOT_UPDATE).with_id(raw_id));
        }
    };
    if patch.is_empty() {
        return reply(ErrorResponse::new(NO_UPDATE_FIELDS).with_id(raw_id));
    }

    debug!(id = %raw_id, fields = ?patch.fields(), "applying patch");

    let Ok(id) = raw_id.parse::<IssueId>() else {
        debug!(id = %raw_id, "update rejected: malformed _id");
        return reply(ErrorResponse::new(COULD_NOT_UPDATE).with_id(raw_id));
    };

    let cmd = UpdateIssueCommand {
        id,
        patch,
        updated_on: Timestamp::now(),
    };
    let handler = state.update_issue_handler();
    let Some(result) = state.bounded(handler.handle(cmd)).await else {
        warn!(id = %raw_id, "update timed out");
        return reply(ErrorResponse::new(COULD_NOT_UPDATE).with_id(raw_id));
    };
    match result {
        Ok(Some(_)) => reply(ResultResponse::new(UPDATED, raw_id)),
        Ok(None) => {
            debug!(id = %raw_id, "update target not found");
            reply(ErrorResponse::new(COULD_NOT_UPDATE).with_id(raw_id))
        }
        Err(err) => {
            error!(id = %raw_id, code = %err.code(), error = %err, "failed to update issue");
            reply(ErrorResponse::new(COULD_NOT_UPDATE).with_id(raw_id))
        }
    }
}

/// DELETE /api/issues/:project - Remove the issue named by `_id`
pub async fn delete_issue(
    State(state): State<IssuesAppState>,
    Path(project): Path<String>,
    Query(params): Query<QueryPairs>,
) -> Response {
    let Some(raw_id) = id_param(&params) else {
        return reply(ErrorResponse::new(MISSING_ID));
    };
    debug!(project = %project, id = %raw_id, "deleting issue");

    let Ok(id) = raw_id.parse::<IssueId>() else {
        debug!(id = %raw_id, "delete rejected: malformed _id");
        return reply(ErrorResponse::new(COULD_NOT_DELETE).with_id(raw_id));
    };

    let handler = state.delete_issue_handler();
    let Some(result) = state.bounded(handler.handle(DeleteIssueCommand { id })).await else {
        warn!(id = %raw_id, "delete timed out");
        return reply(ErrorResponse::new(COULD_NOT_DELETE).with_id(raw_id));
    };
    match result {
        Ok(Some(_)) => reply(ResultResponse::new(DELETED, raw_id)),
        Ok(None) => {
            debug!(id = %raw_id, "delete target not found");
            reply(ErrorResponse::new(COULD_NOT_DELETE).with_id(raw_id))
        }
        Err(err) => {
            error!(id = %raw_id, code = %err.code(), error = %err, "failed to delete issue");
            reply(ErrorResponse::new(COULD_NOT_DELETE).with_id(raw_id))
        }
    }
}
