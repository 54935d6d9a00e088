//! Status enums, roles, and classification types for Relay.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of an incoming requirement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssigneeState
// ---------------------------------------------------------------------------

/// Dispatch state of one assignee on a requirement.
///
/// ```text
/// pending → dispatched
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeState {
    Pending,
    Dispatched,
}

impl AssigneeState {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Dispatched],
            Self::Dispatched => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
        }
    }
}

impl fmt::Display for AssigneeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a task committed to execution.
///
/// ```text
/// in_progress → pending_confirm → completed
///             → completed
/// ```
///
/// A task never starts in a pending state; `pending` belongs to the
/// requirement stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    PendingConfirm,
    Completed,
}

impl TaskStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::InProgress => &[Self::PendingConfirm, Self::Completed],
            Self::PendingConfirm => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the execution log still accepts turns.
    #[must_use]
    pub const fn accepts_turns(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether the delivery report view is unlocked.
    #[must_use]
    pub const fn has_report(self) -> bool {
        matches!(self, Self::PendingConfirm | Self::Completed)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::PendingConfirm => "pending_confirm",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReportStatus
// ---------------------------------------------------------------------------

/// Requirement status recorded on a delivery report.
///
/// ```text
/// ai_in_progress → ai_completed → completed
///                → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The agent is still executing.
    AiInProgress,
    /// The agent finished; awaiting human confirmation.
    AiCompleted,
    /// Merged or accepted.
    Completed,
}

impl ReportStatus {
    /// Report status matching a task status.
    #[must_use]
    pub const fn for_task(status: TaskStatus) -> Self {
        match status {
            TaskStatus::InProgress => Self::AiInProgress,
            TaskStatus::PendingConfirm => Self::AiCompleted,
            TaskStatus::Completed => Self::Completed,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiInProgress => "ai_in_progress",
            Self::AiCompleted => "ai_completed",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WorkStatus
// ---------------------------------------------------------------------------

/// Progress marker on tree nodes and todo items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Pending,
    InProgress,
    Completed,
}

impl WorkStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TodoKind
// ---------------------------------------------------------------------------

/// Kind of a todo item. `code` items carry a snippet instead of children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TodoKind {
    #[default]
    Task,
    Repo,
    File,
    Code,
}

impl TodoKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Repo => "repo",
            Self::File => "file",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for TodoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AnalysisLevel
// ---------------------------------------------------------------------------

/// Tone of an analysis row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl AnalysisLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a change's impact on a business module.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Viewpoint
// ---------------------------------------------------------------------------

/// Whose work a board shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Viewpoint {
    #[default]
    Team,
    Personal,
}

impl Viewpoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Personal => "personal",
        }
    }
}

impl fmt::Display for Viewpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        task_pending_confirm,
        TaskStatus,
        TaskStatus::PendingConfirm,
        "pending_confirm"
    );
    test_serde_roundtrip!(
        task_in_progress,
        TaskStatus,
        TaskStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(
        report_ai_completed,
        ReportStatus,
        ReportStatus::AiCompleted,
        "ai_completed"
    );
    test_serde_roundtrip!(
        assignee_dispatched,
        AssigneeState,
        AssigneeState::Dispatched,
        "dispatched"
    );
    test_serde_roundtrip!(role_assistant, Role, Role::Assistant, "assistant");
    test_serde_roundtrip!(todo_code, TodoKind, TodoKind::Code, "code");

    #[test]
    fn task_status_never_moves_backwards() {
        let all = [
            TaskStatus::InProgress,
            TaskStatus::PendingConfirm,
            TaskStatus::Completed,
        ];
        for from in all {
            for to in from.allowed_next_states() {
                assert!(to > &from, "{from} -> {to} goes backwards");
            }
        }
    }

    #[test]
    fn completed_is_terminal() {
        assert!(TaskStatus::Completed.allowed_next_states().is_empty());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(!TaskStatus::PendingConfirm.can_transition_to(TaskStatus::InProgress));
    }

    #[test]
    fn only_in_progress_accepts_turns() {
        assert!(TaskStatus::InProgress.accepts_turns());
        assert!(!TaskStatus::PendingConfirm.accepts_turns());
        assert!(!TaskStatus::Completed.accepts_turns());
    }

    #[test]
    fn assignee_state_is_one_directional() {
        assert!(AssigneeState::Pending.can_transition_to(AssigneeState::Dispatched));
        assert!(!AssigneeState::Dispatched.can_transition_to(AssigneeState::Pending));
    }

    #[test]
    fn report_status_follows_task_status() {
        assert_eq!(
            ReportStatus::for_task(TaskStatus::PendingConfirm),
            ReportStatus::AiCompleted
        );
        assert_eq!(
            ReportStatus::for_task(TaskStatus::Completed),
            ReportStatus::Completed
        );
    }

    #[test]
    fn todo_kind_defaults_to_task() {
        assert_eq!(TodoKind::default(), TodoKind::Task);
    }
}
