use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AssigneeState, Priority};

/// A demand pulled from a source system, awaiting dispatch by its assignees.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub space_id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Source system name, e.g. `Jira`.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    #[serde(default)]
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Candidate executors, unique by user ID.
    #[serde(default)]
    pub assignees: Vec<AssigneeStatus>,
}

/// Dispatch state of one assignee.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeStatus {
    pub user_id: String,
    /// Display label copied at assignment time.
    pub user_name: String,
    pub status: AssigneeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatched_at: Option<DateTime<Utc>>,
    /// Task created by this assignee's dispatch.
    #[serde(
        rename = "taskId",
        alias = "resultingTaskId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resulting_task_id: Option<String>,
}

impl AssigneeStatus {
    /// A fresh, not yet dispatched assignee.
    pub fn pending(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            status: AssigneeState::Pending,
            dispatched_at: None,
            resulting_task_id: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == AssigneeState::Pending
    }
}
