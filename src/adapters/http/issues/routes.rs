//! Route configuration for issue endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{create_issue, delete_issue, list_issues, update_issue, IssuesAppState};

/// Creates the issue router.
///
/// Routes:
/// - `GET /api/issues/:project` - List issues, query params filter by exact match
/// - `POST /api/issues/:project` - Create an issue from query params
/// - `PUT /api/issues/:project` - Partially update the issue named by `_id`
/// - `DELETE /api/issues/:project` - Delete the issue named by `_id`
pub fn issues_router() -> Router<IssuesAppState> {
    Router::new().route(
        "/api/issues/:project",
        get(list_issues)
            .post(create_issue)
            .put(update_issue)
            .delete(delete_issue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::domain::foundation::{DomainError, IssueId, ProjectName, Timestamp};
    use crate::domain::issue::{Issue, IssuePatch};
    use crate::domain::project::Project;
    use crate::ports::ProjectRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    // ───────────────────────────────────────────────────────────────
    // Fixtures
    // ───────────────────────────────────────────────────────────────

    struct BrokenRepository;

    #[async_trait]
    impl ProjectRepository for BrokenRepository {
        async fn find_by_name(&self, _name: &ProjectName) -> Result<Option<Project>, DomainError> {
            Err(DomainError::database("connection refused"))
        }

        async fn save(&self, _project: &Project) -> Result<(), DomainError> {
            Err(DomainError::database("connection refused"))
        }

        async fn ensure_project(&self, _name: &ProjectName) -> Result<bool, DomainError> {
            Err(DomainError::database("connection refused"))
        }

        async fn issue_exists(&self, _id: &IssueId) -> Result<bool, DomainError> {
            Err(DomainError::database("connection refused"))
        }

        async fn update_issue(
            &self,
            _id: &IssueId,
            _patch: &IssuePatch,
            _updated_on: Timestamp,
        ) -> Result<Option<Issue>, DomainError> {
            Err(DomainError::database("connection refused"))
        }

        async fn delete_issue(&self, _id: &IssueId) -> Result<Option<Issue>, DomainError> {
            Err(DomainError::database("connection refused"))
        }
    }

    /// Every call hangs forever.
    struct StalledRepository;

    #[async_trait]
    impl ProjectRepository for StalledRepository {
        async fn find_by_name(&self, _name: &ProjectName) -> Result<Option<Project>, DomainError> {
            std::future::pending().await
        }

        async fn save(&self, _project: &Project) -> Result<(), DomainError> {
            std::future::pending().await
        }

        async fn ensure_project(&self, _name: &ProjectName) -> Result<bool, DomainError> {
            std::future::pending().await
        }

        async fn issue_exists(&self, _id: &IssueId) -> Result<bool, DomainError> {
            std::future::pending().await
        }

        async fn update_issue(
            &self,
            _id: &IssueId,
            _patch: &IssuePatch,
            _updated_on: Timestamp,
        ) -> Result<Option<Issue>, DomainError> {
            std::future::pending().await
        }

        async fn delete_issue(&self, _id: &IssueId) -> Result<Option<Issue>, DomainError> {
            std::future::pending().await
        }
    }

    fn app_with(repository: Arc<dyn ProjectRepository>) -> Router {
        issues_router().with_state(IssuesAppState::new(repository))
    }

    fn seeded_app() -> Router {
        let project = Project::new(ProjectName::new("apitest").unwrap());
        app_with(Arc::new(InMemoryProjectRepository::with_projects([project])))
    }

    async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn post_then_get_returns_created_issue() {
        let app = seeded_app();

        let (status, created) = call(
            &app,
            Method::POST,
            "/api/issues/apitest?issue_title=T&issue_text=D&created_by=Tester",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["issue_title"], "T");
        assert_eq!(created["assigned_to"], "");
        assert_eq!(created["status_text"], "");
        assert_eq!(created["open"], true);
        assert_eq!(created["created_on"], created["updated_on"]);

        let (_, listed) = call(&app, Method::GET, "/api/issues/apitest").await;
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn post_missing_required_field() {
        let app = seeded_app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/issues/apitest?issue_title=T&created_by=Tester",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "required field(s) missing" }));
    }

    #[tokio::test]
    async fn get_unknown_project_reports_project() {
        let app = seeded_app();
        let (status, body) = call(&app, Method::GET, "/api/issues/nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "error": "could not find project", "project": "nope" })
        );
    }

    #[tokio::test]
    async fn put_and_delete_require_id() {
        let app = seeded_app();
        for method in [Method::PUT, Method::DELETE] {
            let (_, body) = call(&app, method, "/api/issues/apitest?open=false").await;
            assert_eq!(body, json!({ "error": "missing _id" }));
        }
    }

    #[tokio::test]
    async fn put_with_only_id_sends_nothing() {
        let app = seeded_app();
        let (_, body) = call(&app, Method::PUT, "/api/issues/apitest?_id=X").await;
        assert_eq!(body, json!({ "error": "no update field(s) sent", "_id": "X" }));
    }

    #[tokio::test]
    async fn storage_faults_fold_into_error_bodies() {
        let app = app_with(Arc::new(BrokenRepository));
        let id = IssueId::new().to_string();

        let (_, body) = call(&app, Method::GET, "/api/issues/apitest").await;
        assert_eq!(body["error"], "could not find project");

        let (_, body) = call(
            &app,
            Method::POST,
            "/api/issues/apitest?issue_title=T&issue_text=D&created_by=Tester",
        )
        .await;
        assert_eq!(body, json!({ "error": "could not create issue" }));

        let (_, body) = call(
            &app,
            Method::PUT,
            &format!("/api/issues/apitest?_id={id}&open=false"),
        )
        .await;
        assert_eq!(body, json!({ "error": "could not update", "_id": id }));

        let (_, body) = call(&app, Method::DELETE, &format!("/api/issues/apitest?_id={id}")).await;
        assert_eq!(body, json!({ "error": "could not delete", "_id": id }));
    }

    #[tokio::test]
    async fn stalled_storage_still_answers_with_json() {
        let state = IssuesAppState::new(Arc::new(StalledRepository))
            .with_storage_timeout(Duration::from_millis(20));
        let app = issues_router().with_state(state);
        let id = IssueId::new().to_string();

        let (status, body) = call(&app, Method::GET, "/api/issues/apitest").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "error": "could not find project", "project": "apitest" })
        );

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/issues/apitest?issue_title=T&issue_text=D&created_by=Tester",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "could not create issue" }));

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/api/issues/apitest?_id={id}&open=false"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "could not update", "_id": id }));

        let (status, body) =
            call(&app, Method::DELETE, &format!("/api/issues/apitest?_id={id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "could not delete", "_id": id }));
    }
}
