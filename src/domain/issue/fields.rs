//! Issue field names and normalized field values.
//!
//! Query strings arrive as text while issue fields are typed. Every raw value
//! goes through [`FieldValue::normalize`] exactly once, so filters and patches
//! work with typed values instead of comparing strings ad hoc.

use std::fmt;
use std::str::FromStr;

/// The known fields of an issue record, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueField {
    Id,
    IssueTitle,
    IssueText,
    CreatedBy,
    AssignedTo,
    StatusText,
    Open,
    CreatedOn,
    UpdatedOn,
}

impl IssueField {
    pub const ALL: [IssueField; 9] = [
        IssueField::Id,
        IssueField::IssueTitle,
        IssueField::IssueText,
        IssueField::CreatedBy,
        IssueField::AssignedTo,
        IssueField::StatusText,
        IssueField::Open,
        IssueField::CreatedOn,
        IssueField::UpdatedOn,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueField::Id => "_id",
            IssueField::IssueTitle => "issue_title",
            IssueField::IssueText => "issue_text",
            IssueField::CreatedBy => "created_by",
            IssueField::AssignedTo => "assigned_to",
            IssueField::StatusText => "status_text",
            IssueField::Open => "open",
            IssueField::CreatedOn => "created_on",
            IssueField::UpdatedOn => "updated_on",
        }
    }

    /// Looks up a field by wire name. Unknown names yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == key)
    }

    /// Whether a partial update may write this field.
    ///
    /// `_id` and `created_on` never change; `updated_on` is stamped by the server.
    pub fn is_mutable(&self) -> bool {
        !matches!(
            self,
            IssueField::Id | IssueField::CreatedOn | IssueField::UpdatedOn
        )
    }

    /// Whether creation fails when this field is absent.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            IssueField::IssueTitle | IssueField::IssueText | IssueField::CreatedBy
        )
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("unknown issue field: {}", s))
    }
}

/// A field value after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Applies the query normalization rule.
    ///
    /// Literal `"true"` and `"false"` become booleans; everything else,
    /// including `"TRUE"` or `"1"`, stays text unchanged.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "true" => FieldValue::Bool(true),
            "false" => FieldValue::Bool(false),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_converts_literal_booleans() {
        assert_eq!(FieldValue::normalize("true"), FieldValue::Bool(true));
        assert_eq!(FieldValue::normalize("false"), FieldValue::Bool(false));
    }

    #[test]
    fn normalize_leaves_other_values_as_text() {
        assert_eq!(
            FieldValue::normalize("TRUE"),
            FieldValue::Text("TRUE".to_string())
        );
        assert_eq!(FieldValue::normalize("1"), FieldValue::Text("1".to_string()));
        assert_eq!(FieldValue::normalize(""), FieldValue::Text(String::new()));
    }

    #[test]
    fn field_keys_roundtrip() {
        for field in IssueField::ALL {
            assert_eq!(IssueField::from_key(field.as_str()), Some(field));
        }
        assert_eq!(IssueField::from_key("priority"), None);
        assert_eq!(IssueField::from_key("Open"), None);
    }

    #[test]
    fn immutable_fields_are_identity_and_timestamps() {
        let immutable: Vec<_> = IssueField::ALL
            .iter()
            .filter(|f| !f.is_mutable())
            .copied()
            .collect();
        assert_eq!(
            immutable,
            vec![IssueField::Id, IssueField::CreatedOn, IssueField::UpdatedOn]
        );
    }

    #[test]
    fn required_fields_are_title_text_and_reporter() {
        let required: Vec<_> = IssueField::ALL
            .iter()
            .filter(|f| f.is_required())
            .copied()
            .collect();
        assert_eq!(
            required,
            vec![
                IssueField::IssueTitle,
                IssueField::IssueText,
                IssueField::CreatedBy
            ]
        );
    }
}
