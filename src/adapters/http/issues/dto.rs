//! HTTP DTOs for issue endpoints.
//!
//! Every input arrives as query-string pairs. The functions here turn those
//! pairs into typed domain values; the response types shape the JSON bodies.

use serde::Serialize;
use tracing::debug;

use crate::domain::issue::{IssueDraft, IssueError, IssueField, IssuePatch};
use crate::domain::project::IssueFilter;

/// Raw query-string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

pub const REQUIRED_FIELDS_MISSING: &str = "required field(s) missing";
pub const INVALID_ID: &str = "invalid _id";
pub const INVALID_FIELD_VALUE: &str = "invalid field value";
pub const COULD_NOT_CREATE: &str = "could not create issue";
pub const COULD_NOT_FIND_PROJECT: &str = "could not find project";
pub const MISSING_ID: &str = "missing _id";
pub const NO_UPDATE_FIELDS: &str = "no update field(s) sent";
pub const COULD_NOT_UPDATE: &str = "could not update";
pub const COULD_NOT_DELETE: &str = "could not delete";
pub const UPDATED: &str = "successfully updated";
pub const DELETED: &str = "successfully deleted";

// ════════════════════════════════════════════════════════════════════════════
// Request parsing
// ════════════════════════════════════════════════════════════════════════════

/// Every pair becomes a criterion; unknown keys are kept so they match nothing.
pub fn filter_from_query(pairs: &[(String, String)]) -> IssueFilter {
    IssueFilter::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Builds a creation draft. Unknown keys are skipped.
pub fn draft_from_query(pairs: &[(String, String)]) -> Result<IssueDraft, IssueError> {
    let mut draft = IssueDraft::default();
    for (key, value) in pairs {
        match IssueField::from_key(key) {
            Some(field) => draft.set(field, value)?,
            None => debug!(key = %key, "ignoring unknown create parameter"),
        }
    }
    Ok(draft)
}

/// The raw `_id` parameter, if sent.
pub fn id_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .rev()
        .find(|(key, _)| key == IssueField::Id.as_str())
        .map(|(_, value)| value.as_str())
}

/// Builds a partial update from everything except `_id`.
///
/// Unknown keys and server-managed fields are dropped, so the result may be
/// empty even when the request carried other parameters.
pub fn patch_from_query(pairs: &[(String, String)]) -> Result<IssuePatch, IssueError> {
    let mut patch = IssuePatch::default();
    for (key, value) in pairs {
        match IssueField::from_key(key) {
            Some(IssueField::Id) => {}
            Some(field) if field.is_mutable() => patch.set(field, value)?,
            Some(field) => debug!(field = %field, "ignoring immutable update parameter"),
            None => debug!(key = %key, "ignoring unknown update parameter"),
        }
    }
    Ok(patch)
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// `{ "error": ... }` with optional context keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            id: None,
            project: None,
            field: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_field(mut self, field: IssueField) -> Self {
        self.field = Some(field.as_str().to_string());
        self
    }

    pub fn project_not_found(project: impl Into<String>) -> Self {
        Self::new(COULD_NOT_FIND_PROJECT).with_project(project)
    }
}

/// `{ "result": ..., "_id": ... }` for successful updates and deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultResponse {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ResultResponse {
    pub fn new(result: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            id: id.into(),
        }
    }
}
