//! Issue entity.
//!
//! Issues are always embedded in exactly one project. They are created from an
//! [`IssueDraft`], mutated only through an [`IssuePatch`], and removed by their
//! owning project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IssueId, Timestamp};

use super::{FieldValue, IssueError, IssueField, IssuePatch};

/// A single tracked work item.
///
/// # Invariants
///
/// - `issue_title`, `issue_text`, `created_by` are non-empty
/// - `created_on` never changes after creation
/// - `updated_on >= created_on`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "_id")]
    id: IssueId,
    issue_title: String,
    issue_text: String,
    created_by: String,
    #[serde(default)]
    assigned_to: String,
    #[serde(default)]
    status_text: String,
    #[serde(default = "default_open")]
    open: bool,
    created_on: Timestamp,
    updated_on: Timestamp,
}

fn default_open() -> bool {
    true
}

/// Candidate fields for a new issue, as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub id: Option<IssueId>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
}

impl IssueDraft {
    /// Sets a field from its raw query value.
    ///
    /// Server-managed timestamps are ignored. `open` only accepts `true`/`false`.
    ///
    /// # Errors
    ///
    /// - `InvalidId` if `_id` is not a valid identifier
    /// - `InvalidFieldValue` if `open` is not a boolean
    pub fn set(&mut self, field: IssueField, raw: &str) -> Result<(), IssueError> {
        match field {
            IssueField::Id => {
                let id = raw.parse().map_err(|_| IssueError::invalid_id(raw))?;
                self.id = Some(id);
            }
            IssueField::IssueTitle => self.issue_title = Some(raw.to_string()),
            IssueField::IssueText => self.issue_text = Some(raw.to_string()),
            IssueField::CreatedBy => self.created_by = Some(raw.to_string()),
            IssueField::AssignedTo => self.assigned_to = Some(raw.to_string()),
            IssueField::StatusText => self.status_text = Some(raw.to_string()),
            IssueField::Open => {
                let open = FieldValue::normalize(raw)
                    .as_bool()
                    .ok_or_else(|| IssueError::invalid_value(field, raw))?;
                self.open = Some(open);
            }
            IssueField::CreatedOn | IssueField::UpdatedOn => {}
        }
        Ok(())
    }
}

fn required(value: Option<String>) -> Result<String, IssueError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(IssueError::RequiredFieldsMissing),
    }
}

impl Issue {
    /// Create a new open issue from a draft.
    ///
    /// Optional fields default to `""` / `true`; `created_on` and `updated_on`
    /// are both set to the current time. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// - `RequiredFieldsMissing` if title, text or reporter is absent or empty
    pub fn create(draft: IssueDraft) -> Result<Self, IssueError> {
        let issue_title = required(draft.issue_title)?;
        let issue_text = required(draft.issue_text)?;
        let created_by = required(draft.created_by)?;

        let now = Timestamp::now();
        Ok(Self {
            id: draft.id.unwrap_or_default(),
            issue_title,
            issue_text,
            created_by,
            assigned_to: draft.assigned_to.unwrap_or_default(),
            status_text: draft.status_text.unwrap_or_default(),
            open: draft.open.unwrap_or(true),
            created_on: now,
            updated_on: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &IssueId {
        &self.id
    }

    pub fn issue_title(&self) -> &str {
        &self.issue_title
    }

    pub fn issue_text(&self) -> &str {
        &self.issue_text
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn assigned_to(&self) -> &str {
        &self.assigned_to
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn created_on(&self) -> &Timestamp {
        &self.created_on
    }

    pub fn updated_on(&self) -> &Timestamp {
        &self.updated_on
    }

    /// Returns a field's value, normalized the same way query values are.
    ///
    /// Identifiers and timestamps are compared by their serialized form.
    pub fn field_value(&self, field: IssueField) -> FieldValue {
        match field {
            IssueField::Id => FieldValue::normalize(&self.id.to_string()),
            IssueField::IssueTitle => FieldValue::normalize(&self.issue_title),
            IssueField::IssueText => FieldValue::normalize(&self.issue_text),
            IssueField::CreatedBy => FieldValue::normalize(&self.created_by),
            IssueField::AssignedTo => FieldValue::normalize(&self.assigned_to),
            IssueField::StatusText => FieldValue::normalize(&self.status_text),
            IssueField::Open => FieldValue::Bool(self.open),
            IssueField::CreatedOn => FieldValue::Text(self.created_on.to_iso_string()),
            IssueField::UpdatedOn => FieldValue::Text(self.updated_on.to_iso_string()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Merges every field present in the patch and stamps `updated_on`.
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: &IssuePatch, updated_on: Timestamp) {
        if let Some(v) = &patch.issue_title {
            self.issue_title = v.clone();
        }
        if let Some(v) = &patch.issue_text {
            self.issue_text = v.clone();
        }
        if let Some(v) = &patch.created_by {
            self.created_by = v.clone();
        }
        if let Some(v) = &patch.assigned_to {
            self.assigned_to = v.clone();
        }
        if let Some(v) = &patch.status_text {
            self.status_text = v.clone();
        }
        if let Some(open) = patch.open {
            self.open = open;
        }
        self.updated_on = updated_on;
    }
}
