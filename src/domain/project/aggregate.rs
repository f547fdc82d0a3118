//! Project aggregate.
//!
//! A project is a named, ordered bucket of issues and the unit that gets
//! persisted: every issue mutation rewrites the whole project document.
//!
//! # Ownership
//!
//! Projects exclusively own their embedded issues. Issues carry no
//! back-reference to their project.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IssueId, ProjectName, Timestamp};
use crate::domain::issue::{Issue, IssueError, IssuePatch};

/// Project aggregate - a named container of issues.
///
/// # Invariants
///
/// - `issues` is in creation order
/// - issue ids are unique within the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: ProjectName,
    #[serde(default)]
    issues: Vec<Issue>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: ProjectName) -> Self {
        Self {
            name,
            issues: Vec::new(),
        }
    }

    /// Reconstitute a project from persistence (no validation).
    pub fn reconstitute(name: ProjectName, issues: Vec<Issue>) -> Self {
        Self { name, issues }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Issues in creation order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn find_issue(&self, id: &IssueId) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id() == id)
    }

    pub fn contains_issue(&self, id: &IssueId) -> bool {
        self.find_issue(id).is_some()
    }

    /// Appends an issue at the end of the list.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if an issue with the same id is already embedded
    pub fn add_issue(&mut self, issue: Issue) -> Result<(), IssueError> {
        if self.contains_issue(issue.id()) {
            return Err(IssueError::DuplicateId(*issue.id()));
        }
        self.issues.push(issue);
        Ok(())
    }

    /// Merges a patch onto the matching issue. Returns the updated issue, or
    /// `None` if this project does not embed it.
    pub fn update_issue(
        &mut self,
        id: &IssueId,
        patch: &IssuePatch,
        updated_on: Timestamp,
    ) -> Option<&Issue> {
        let issue = self.issues.iter_mut().find(|i| i.id() == id)?;
        issue.apply(patch, updated_on);
        Some(issue)
    }

    /// Removes the matching issue, preserving the order of the rest.
    pub fn remove_issue(&mut self, id: &IssueId) -> Option<Issue> {
        let pos = self.issues.iter().position(|i| i.id() == id)?;
        Some(self.issues.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issue::IssueDraft;

    fn project() -> Project {
        Project::new(ProjectName::new("apitest").unwrap())
    }

    fn issue(title: &str) -> Issue {
        Issue::create(IssueDraft {
            issue_title: Some(title.to_string()),
            issue_text: Some("text".to_string()),
            created_by: Some("Tester".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn add_issue_preserves_insertion_order() {
        let mut project = project();
        project.add_issue(issue("a")).unwrap();
        project.add_issue(issue("b")).unwrap();
        project.add_issue(issue("c")).unwrap();

        let titles: Vec<_> = project.issues().iter().map(|i| i.issue_title()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn add_issue_rejects_duplicate_id() {
        let mut project = project();
        let first = issue("a");
        let id = *first.id();
        project.add_issue(first.clone()).unwrap();

        assert_eq!(
            project.add_issue(first).unwrap_err(),
            IssueError::DuplicateId(id)
        );
        assert_eq!(project.issues().len(), 1);
    }

    #[test]
    fn update_issue_returns_none_for_unknown_id() {
        let mut project = project();
        project.add_issue(issue("a")).unwrap();

        let patch = IssuePatch {
            open: Some(false),
            ..Default::default()
        };
        assert!(project
            .update_issue(&IssueId::new(), &patch, Timestamp::now())
            .is_none());
        assert!(project.issues()[0].is_open());
    }

    #[test]
    fn update_issue_merges_patch() {
        let mut project = project();
        let target = issue("a");
        let id = *target.id();
        project.add_issue(target).unwrap();

        let patch = IssuePatch {
            status_text: Some("in progress".to_string()),
            ..Default::default()
        };
        let updated = project.update_issue(&id, &patch, Timestamp::now()).unwrap();
        assert_eq!(updated.status_text(), "in progress");
        assert_eq!(updated.issue_title(), "a");
    }

    #[test]
    fn remove_issue_keeps_remaining_order() {
        let mut project = project();
        let middle = issue("b");
        let id = *middle.id();
        project.add_issue(issue("a")).unwrap();
        project.add_issue(middle).unwrap();
        project.add_issue(issue("c")).unwrap();

        let removed = project.remove_issue(&id).unwrap();
        assert_eq!(removed.issue_title(), "b");

        let titles: Vec<_> = project.issues().iter().map(|i| i.issue_title()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(project.remove_issue(&id).is_none());
    }

    #[test]
    fn serializes_as_document() {
        let mut project = project();
        project.add_issue(issue("a")).unwrap();

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["name"], "apitest");
        assert_eq!(json["issues"][0]["issue_title"], "a");

        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back, project);
    }
}
