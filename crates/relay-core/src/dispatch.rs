//! Assignee dispatch ledger.
//!
//! Each assignee of a requirement dispatches independently: dispatching
//! turns that assignee's entry `pending → dispatched` and creates one task
//! for them. Other entries are untouched. A requirement sits in the pool
//! while at least one assignee is still pending; a requirement with no
//! assignees is never in the pool.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AssigneeStatus, Requirement, Task, TaskGitRepo, validate_git_repos};
use crate::enums::{AssigneeState, TaskStatus};
use crate::errors::CoreError;
use crate::ids::{IdGenerator, PREFIX_TASK};

/// Body of `POST /requirements/{id}/dispatch`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub user_id: String,
    /// Appended to the requirement description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub git_repos: Vec<TaskGitRepo>,
}

impl DispatchRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            supplemental_text: None,
            git_repos: Vec::new(),
        }
    }

    /// Key under which retries of this dispatch are deduplicated.
    #[must_use]
    pub fn idempotency_key(&self, requirement_id: &str) -> String {
        format!("dispatch:{requirement_id}:{}", self.user_id)
    }
}

/// Dispatched versus total assignees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DispatchProgress {
    pub dispatched: usize,
    pub total: usize,
}

impl Requirement {
    /// Visible in the pool lane: some assignee is still pending.
    #[must_use]
    pub fn is_in_pool(&self) -> bool {
        if self.assignees.is_empty() {
            return false;
        }
        self.assignees.iter().any(AssigneeStatus::is_pending)
    }

    /// Every assignee has dispatched. False when there are no assignees.
    #[must_use]
    pub fn is_fully_dispatched(&self) -> bool {
        if self.assignees.is_empty() {
            return false;
        }
        self.assignees
            .iter()
            .all(|a| a.status == AssigneeState::Dispatched)
    }

    #[must_use]
    pub fn assignee(&self, user_id: &str) -> Option<&AssigneeStatus> {
        self.assignees.iter().find(|a| a.user_id == user_id)
    }

    /// `user_id` is assigned and has not dispatched yet.
    #[must_use]
    pub fn is_pending_for(&self, user_id: &str) -> bool {
        self.assignee(user_id).is_some_and(AssigneeStatus::is_pending)
    }

    #[must_use]
    pub fn dispatch_progress(&self) -> DispatchProgress {
        DispatchProgress {
            dispatched: self
                .assignees
                .iter()
                .filter(|a| a.status == AssigneeState::Dispatched)
                .count(),
            total: self.assignees.len(),
        }
    }

    /// Add a pending assignee.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the user is already assigned.
    pub fn add_assignee(
        &mut self,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Result<(), CoreError> {
        let user_id = user_id.into();
        if self.assignee(&user_id).is_some() {
            return Err(CoreError::validation(
                "assignees",
                format!("{user_id} is already assigned to {}", self.id),
            ));
        }
        self.assignees
            .push(AssigneeStatus::pending(user_id, user_name));
        Ok(())
    }
}

/// Dispatch `requirement` for one assignee and return the new task.
///
/// The task copies the requirement's title and description (with the
/// supplemental text appended after a blank line) and starts `in_progress`.
///
/// # Errors
///
/// - [`CoreError::Validation`] for a repo without a base branch.
/// - [`CoreError::NotAssigned`] if the user is not an assignee.
/// - [`CoreError::AlreadyDispatched`] if the user already dispatched.
///
/// Nothing is modified when an error is returned.
pub fn dispatch(
    requirement: &mut Requirement,
    request: &DispatchRequest,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Task, CoreError> {
    validate_git_repos(&request.git_repos)?;

    let requirement_id = requirement.id.clone();
    let entry = requirement
        .assignees
        .iter_mut()
        .find(|a| a.user_id == request.user_id)
        .ok_or_else(|| CoreError::NotAssigned {
            requirement_id: requirement_id.clone(),
            user_id: request.user_id.clone(),
        })?;

    if !entry.status.can_transition_to(AssigneeState::Dispatched) {
        return Err(CoreError::AlreadyDispatched {
            requirement_id,
            user_id: request.user_id.clone(),
        });
    }

    let description = match request.supplemental_text.as_deref().map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{}\n\n{extra}", requirement.description),
        _ => requirement.description.clone(),
    };

    let task = Task {
        id: ids.generate_id(PREFIX_TASK),
        space_id: requirement.space_id.clone(),
        requirement_id: Some(requirement_id.clone()),
        title: requirement.title.clone(),
        description,
        status: TaskStatus::InProgress,
        created_by: request.user_id.clone(),
        created_at: now,
        updated_at: now,
        completed_at: None,
        git_repos: request.git_repos.clone(),
    };

    entry.status = AssigneeState::Dispatched;
    entry.dispatched_at = Some(now);
    entry.resulting_task_id = Some(task.id.clone());

    tracing::debug!(
        requirement_id = %requirement_id,
        user_id = %request.user_id,
        task_id = %task.id,
        "dispatched requirement"
    );
    Ok(task)
}

/// Look up `requirement_id` in `requirements` and [`dispatch`] it.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] for an unknown requirement, otherwise
/// whatever [`dispatch`] returns.
pub fn dispatch_in(
    requirements: &mut [Requirement],
    requirement_id: &str,
    request: &DispatchRequest,
    ids: &dyn IdGenerator,
    now: DateTime<Utc>,
) -> Result<Task, CoreError> {
    let requirement = requirements
        .iter_mut()
        .find(|r| r.id == requirement_id)
        .ok_or_else(|| CoreError::NotFound {
            entity_type: "requirement".into(),
            id: requirement_id.to_string(),
        })?;
    dispatch(requirement, request, ids, now)
}
