use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaskStatus;
use crate::errors::CoreError;

/// Longest title derived from a description's first line.
pub const DERIVED_TITLE_MAX_CHARS: usize = 50;

/// A unit of work committed to execution by exactly one actor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub space_id: String,
    /// Requirement this task was dispatched from; `None` for freestanding
    /// submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement_id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set only on entering `completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub git_repos: Vec<TaskGitRepo>,
}

/// Repository and base branch a task works against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskGitRepo {
    pub git_repo_id: String,
    pub git_repo_name: String,
    pub base_branch: String,
}

/// Freestanding task submission (`POST /tasks`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub space_id: String,
    /// Derived from the description's first line when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub git_repos: Vec<TaskGitRepo>,
}

impl NewTask {
    /// Check the submission before any task is created.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an empty space or description, a
    /// repo with a blank base branch, or a repo selected twice.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.space_id.trim().is_empty() {
            return Err(CoreError::validation("spaceId", "a space must be selected"));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::validation(
                "description",
                "requirement description must not be empty",
            ));
        }
        validate_git_repos(&self.git_repos)
    }

    /// Title to submit: the explicit one, or the description's first line.
    #[must_use]
    pub fn effective_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => derive_title(&self.description),
        }
    }
}

/// First non-blank line of `description`, truncated to
/// [`DERIVED_TITLE_MAX_CHARS`] characters.
#[must_use]
pub fn derive_title(description: &str) -> String {
    description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .chars()
        .take(DERIVED_TITLE_MAX_CHARS)
        .collect()
}

/// Every selected repo needs a base branch, and no repo may appear twice.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] naming the first offending repo.
pub fn validate_git_repos(repos: &[TaskGitRepo]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for (index, repo) in repos.iter().enumerate() {
        if repo.base_branch.trim().is_empty() {
            return Err(CoreError::validation(
                format!("gitRepos[{index}].baseBranch"),
                format!("base branch is required for {}", repo.git_repo_name),
            ));
        }
        if !seen.insert(repo.git_repo_id.as_str()) {
            return Err(CoreError::validation(
                format!("gitRepos[{index}].gitRepoId"),
                format!("{} is selected more than once", repo.git_repo_name),
            ));
        }
    }
    Ok(())
}
