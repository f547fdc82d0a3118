//! Partial update of an issue.

use serde::{Deserialize, Serialize};

use super::{FieldValue, IssueError, IssueField};

/// A whitelisted set of field changes.
///
/// One optional slot per mutable field; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

impl IssuePatch {
    /// Sets a mutable field from its raw query value.
    ///
    /// Text fields keep the raw value verbatim. `open` goes through the
    /// normalization rule and must come out as a boolean.
    ///
    /// # Errors
    ///
    /// - `ImmutableField` for `_id`, `created_on`, `updated_on`
    /// - `InvalidFieldValue` if `open` is not `true`/`false`
    pub fn set(&mut self, field: IssueField, raw: &str) -> Result<(), IssueError> {
        match field {
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
            IssueField::Id | IssueField::CreatedOn | IssueField::UpdatedOn => {
                return Err(IssueError::ImmutableField(field));
            }
        }
        Ok(())
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.issue_title.is_none()
            && self.issue_text.is_none()
            && self.created_by.is_none()
            && self.assigned_to.is_none()
            && self.status_text.is_none()
            && self.open.is_none()
    }

    /// Names of the fields this patch writes.
    pub fn fields(&self) -> Vec<IssueField> {
        let slots = [
            (IssueField::IssueTitle, self.issue_title.is_some()),
            (IssueField::IssueText, self.issue_text.is_some()),
            (IssueField::CreatedBy, self.created_by.is_some()),
            (IssueField::AssignedTo, self.assigned_to.is_some()),
            (IssueField::StatusText, self.status_text.is_some()),
            (IssueField::Open, self.open.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(field, present)| present.then_some(field))
            .collect()
    }
}
