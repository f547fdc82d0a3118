//! Project-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectName};

/// Project-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// No project has this exact name.
    #[error("project not found: {0}")]
    NotFound(ProjectName),

    /// Storage fault.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl ProjectError {
    pub fn not_found(name: ProjectName) -> Self {
        ProjectError::NotFound(name)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProjectError::NotFound(_) => ErrorCode::ProjectNotFound,
            ProjectError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ProjectError {
    fn from(err: DomainError) -> Self {
        ProjectError::Infrastructure(err.to_string())
    }
}
