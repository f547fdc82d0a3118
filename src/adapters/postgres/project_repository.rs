//! PostgreSQL implementation of ProjectRepository.
//!
//! Stores each project as one row whose `issues` column is a JSONB array of
//! issue documents. Issue-level operations locate the owning row with a JSONB
//! containment query, apply the change in Rust, and write the array back.

use async_trait::async_trait;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{DomainError, ErrorCode, IssueId, ProjectName, Timestamp};
use crate::domain::issue::{Issue, IssuePatch};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new PostgresProjectRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Locks and loads the project embedding `id`.
    async fn lock_owner(
        tx: &mut Transaction<'_, Postgres>,
        id: &IssueId,
    ) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT name, issues
            FROM projects
            WHERE issues @> $1
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(issue_id_probe(id))
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to locate issue {}: {}", id, e),
            )
        })?;

        row.map(row_to_project).transpose()
    }

    async fn write_issues(
        tx: &mut Transaction<'_, Postgres>,
        project: &Project,
    ) -> Result<(), DomainError> {
        sqlx::query("UPDATE projects SET issues = $2, updated_at = NOW() WHERE name = $1")
            .bind(project.name().as_str())
            .bind(Json(project.issues()))
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to write project {}: {}", project.name(), e),
                )
            })?;
        Ok(())
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })
    }
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit().await.map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to commit transaction: {}", e),
        )
    })
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_name(&self, name: &ProjectName) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query("SELECT name, issues FROM projects WHERE name = $1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch project: {}", e),
                )
            })?;

        row.map(row_to_project).transpose()
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (name, issues, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (name) DO UPDATE SET
                issues = EXCLUDED.issues,
                updated_at = NOW()
            "#,
        )
        .bind(project.name().as_str())
        .bind(Json(project.issues()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save project: {}", e),
            )
        })?;

        Ok(())
    }

    async fn ensure_project(&self, name: &ProjectName) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO projects (name, issues, created_at, updated_at)
            VALUES ($1, '[]'::jsonb, NOW(), NOW())
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to create project: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn issue_exists(&self, id: &IssueId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM projects WHERE issues @> $1) AS taken")
            .bind(issue_id_probe(id))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to look up issue {}: {}", id, e))
            })?;

        row.try_get("taken").map_err(|e| {
            DomainError::database(format!("Failed to read lookup result: {}", e))
        })
    }

    async fn update_issue(
        &self,
        id: &IssueId,
        patch: &IssuePatch,
        updated_on: Timestamp,
    ) -> Result<Option<Issue>, DomainError> {
        let mut tx = self.begin().await?;

        let Some(mut project) = Self::lock_owner(&mut tx, id).await? else {
            return Ok(None);
        };
        let updated = project.update_issue(id, patch, updated_on).cloned();
        if updated.is_some() {
            Self::write_issues(&mut tx, &project).await?;
        }

        commit(tx).await?;
        Ok(updated)
    }

    async fn delete_issue(&self, id: &IssueId) -> Result<Option<Issue>, DomainError> {
        let mut tx = self.begin().await?;

        let Some(mut project) = Self::lock_owner(&mut tx, id).await? else {
            return Ok(None);
        };
        let removed = project.remove_issue(id);
        if removed.is_some() {
            Self::write_issues(&mut tx, &project).await?;
        }

        commit(tx).await?;
        Ok(removed)
    }
}

/// JSONB containment probe matching any issue array holding this id.
fn issue_id_probe(id: &IssueId) -> Json<serde_json::Value> {
    Json(json!([{ "_id": id.to_string() }]))
}

fn row_to_project(row: PgRow) -> Result<Project, DomainError> {
    let name: String = row.try_get("name").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to read name: {}", e))
    })?;
    let Json(issues): Json<Vec<Issue>> = row.try_get("issues").map_err(|e| {
        DomainError::new(
            ErrorCode::SerializationError,
            format!("Failed to decode issues of {}: {}", name, e),
        )
    })?;
    let name = ProjectName::new(name)?;

    Ok(Project::reconstitute(name, issues))
}
