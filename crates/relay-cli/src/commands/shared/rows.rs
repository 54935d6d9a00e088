//! Flat row shapes for table output.

use relay_core::entities::{Requirement, Task};
use relay_core::lifecycle::completion_days;
use serde::Serialize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementRow {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub source: String,
    /// `x/y` assignees dispatched.
    pub dispatched: String,
    pub created_at: String,
}

impl From<&Requirement> for RequirementRow {
    fn from(requirement: &Requirement) -> Self {
        let progress = requirement.dispatch_progress();
        Self {
            id: requirement.id.clone(),
            title: requirement.title.clone(),
            priority: requirement.priority.to_string(),
            source: requirement.source.clone(),
            dispatched: format!("{}/{}", progress.dispatched, progress.total),
            created_at: requirement.created_at.format(TIME_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub status: String,
    pub created_by: String,
    pub created_at: String,
    pub completed_at: Option<String>,
    /// Rounded up to whole days.
    pub days: Option<i64>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            status: task.status.to_string(),
            created_by: task.created_by.clone(),
            created_at: task.created_at.format(TIME_FORMAT).to_string(),
            completed_at: task
                .completed_at
                .map(|at| at.format(TIME_FORMAT).to_string()),
            days: completion_days(task),
        }
    }
}
