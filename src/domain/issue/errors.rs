//! Issue-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, IssueId, ProjectName};
use crate::domain::project::ProjectError;

use super::IssueField;

/// Issue-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// One or more of `issue_title`, `issue_text`, `created_by` is absent or empty.
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    /// The supplied `_id` is not a valid identifier.
    #[error("invalid _id: {0}")]
    InvalidId(String),

    /// A value cannot be stored in the named field.
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidFieldValue { field: IssueField, value: String },

    /// The field may not be written by a partial update.
    #[error("field '{0}' cannot be updated")]
    ImmutableField(IssueField),

    /// An issue with this id already exists in the project.
    #[error("issue already exists: {0}")]
    DuplicateId(IssueId),

    /// No issue with this id exists in any project.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectName),

    /// Storage fault.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl IssueError {
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        IssueError::InvalidId(raw.into())
    }

    pub fn invalid_value(field: IssueField, value: impl Into<String>) -> Self {
        IssueError::InvalidFieldValue {
            field,
            value: value.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        IssueError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            IssueError::RequiredFieldsMissing => ErrorCode::ValidationFailed,
            IssueError::InvalidId(_) => ErrorCode::InvalidFormat,
            IssueError::InvalidFieldValue { .. } => ErrorCode::InvalidFormat,
            IssueError::ImmutableField(_) => ErrorCode::ValidationFailed,
            IssueError::DuplicateId(_) => ErrorCode::ValidationFailed,
            IssueError::NotFound(_) => ErrorCode::IssueNotFound,
            IssueError::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            IssueError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for IssueError {
    fn from(err: DomainError) -> Self {
        IssueError::Infrastructure(err.to_string())
    }
}

impl From<ProjectError> for IssueError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(name) => IssueError::ProjectNotFound(name),
            ProjectError::Infrastructure(msg) => IssueError::Infrastructure(msg),
        }
    }
}
