//! Task lifecycle state machine.
//!
//! ```text
//! in_progress ──agent finishes──▶ pending_confirm ──human confirms──▶ completed
//!      └──────────agent completes directly──────────────────────────▶ completed
//! ```
//!
//! [`TaskRecord`] bundles a task with its conversation log, its delivery
//! report (once one exists), and the status changes it went through. Every
//! mutation goes through [`TaskStatus::can_transition_to`], so the observed
//! status sequence never steps backwards.

use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content::ContentPayload;
use crate::entities::{ConversationTurn, DeliveryReport, NewTask, NewTurn, Task};
use crate::enums::{ReportStatus, TaskStatus};
use crate::errors::CoreError;
use crate::identity::Actor;
use crate::ids::{IdGenerator, PREFIX_TASK, PREFIX_TURN};
use crate::log::ConversationLog;
use crate::report::{CostRate, ReportAvailability, aggregate};

const SECONDS_PER_DAY: i64 = 86_400;

/// One recorded status change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub at: DateTime<Utc>,
}

/// A task together with everything it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    task: Task,
    log: ConversationLog,
    report: Option<DeliveryReport>,
    history: Vec<StatusChange>,
}

impl TaskRecord {
    /// Start tracking a freshly created task with an empty log.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] unless the task is `in_progress`.
    pub fn open(task: Task) -> Result<Self, CoreError> {
        if task.status != TaskStatus::InProgress {
            return Err(CoreError::validation(
                "status",
                format!("new task {} must start in_progress, got {}", task.id, task.status),
            ));
        }
        let log = ConversationLog::new(task.id.clone());
        Ok(Self {
            task,
            log,
            report: None,
            history: Vec::new(),
        })
    }

    /// Create a freestanding task from a submission form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the submission is invalid. No ID
    /// is consumed in that case.
    pub fn submit(
        submission: &NewTask,
        actor: &Actor,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        submission.validate()?;
        let task = Task {
            id: ids.generate_id(PREFIX_TASK),
            space_id: submission.space_id.clone(),
            requirement_id: None,
            title: submission.effective_title(),
            description: submission.description.clone(),
            status: TaskStatus::InProgress,
            created_by: actor.user_id.clone(),
            created_at: now,
            updated_at: now,
            completed_at: None,
            git_repos: submission.git_repos.clone(),
        };
        tracing::debug!(task_id = %task.id, created_by = %task.created_by, "submitted task");
        Self::open(task)
    }

    /// Rebuild a record from backend state.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the turns do not form a valid log
    /// for this task, or the report belongs to another task or disagrees with
    /// the task's status.
    pub fn restore(
        task: Task,
        turns: Vec<ConversationTurn>,
        report: Option<DeliveryReport>,
    ) -> Result<Self, CoreError> {
        let log = ConversationLog::from_turns(task.id.clone(), turns)?;
        if let Some(report) = &report {
            check_report_owner(&task, report)?;
            let expected = ReportStatus::for_task(task.status);
            if report.requirement_status != expected {
                return Err(CoreError::validation(
                    "requirementStatus",
                    format!(
                        "report {} is {} but task {} is {}",
                        report.id, report.requirement_status, task.id, task.status
                    ),
                ));
            }
        }
        Ok(Self {
            task,
            log,
            report,
            history: Vec::new(),
        })
    }

    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.task.status
    }

    #[must_use]
    pub const fn log(&self) -> &ConversationLog {
        &self.log
    }

    #[must_use]
    pub const fn report(&self) -> Option<&DeliveryReport> {
        self.report.as_ref()
    }

    /// Status changes made through this record, oldest first.
    #[must_use]
    pub fn history(&self) -> &[StatusChange] {
        &self.history
    }

    /// Append a turn to the log.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LogClosed`] once the task has left `in_progress`,
    /// or [`CoreError::Validation`] for an invalid structured payload.
    pub fn append_turn(
        &mut self,
        turn: NewTurn,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<&ConversationTurn, CoreError> {
        let turn = ConversationTurn {
            id: ids.generate_id(PREFIX_TURN),
            task_id: self.task.id.clone(),
            role: turn.role,
            content: turn.content,
            structured_content: turn.structured_content.map(ContentPayload::from),
            step: turn.step,
            created_at: now,
        };
        self.log.append(self.task.status, turn)
    }

    /// Record an interim report while the agent is still running.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] unless the task is `in_progress` and
    /// the report belongs to it.
    pub fn attach_interim_report(&mut self, mut report: DeliveryReport) -> Result<(), CoreError> {
        if self.task.status != TaskStatus::InProgress {
            return Err(CoreError::validation(
                "status",
                format!("task {} already has a final report", self.task.id),
            ));
        }
        check_report_owner(&self.task, &report)?;
        report.requirement_status = ReportStatus::AiInProgress;
        self.report = Some(report);
        Ok(())
    }

    /// The agent finished and hands the report over for human confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the task is
    /// `in_progress`.
    pub fn submit_for_confirmation(
        &mut self,
        report: DeliveryReport,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.finish(TaskStatus::PendingConfirm, report, now)
    }

    /// The agent finished and no confirmation is required.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the task is
    /// `in_progress`.
    pub fn complete_directly(
        &mut self,
        report: DeliveryReport,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.finish(TaskStatus::Completed, report, now)
    }

    /// Human confirmation of a `pending_confirm` task. Accept-only.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the task is
    /// `pending_confirm`.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<(), CoreError> {
        if self.task.status != TaskStatus::PendingConfirm {
            return Err(self.invalid_transition(TaskStatus::Completed));
        }
        self.transition(TaskStatus::Completed, now)?;
        if let Some(report) = self.report.as_mut() {
            report.requirement_status = ReportStatus::Completed;
            report.updated_at = now;
        }
        Ok(())
    }

    fn finish(
        &mut self,
        next: TaskStatus,
        mut report: DeliveryReport,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if self.task.status != TaskStatus::InProgress {
            return Err(self.invalid_transition(next));
        }
        check_report_owner(&self.task, &report)?;
        self.transition(next, now)?;
        report.requirement_status = ReportStatus::for_task(next);
        self.report = Some(report);
        Ok(())
    }

    fn transition(&mut self, next: TaskStatus, now: DateTime<Utc>) -> Result<(), CoreError> {
        let current = self.task.status;
        if !current.can_transition_to(next) {
            return Err(self.invalid_transition(next));
        }

        self.task.status = next;
        self.task.updated_at = now;
        if next == TaskStatus::Completed {
            self.task.completed_at = Some(now);
        }
        self.history.push(StatusChange {
            from: current,
            to: next,
            at: now,
        });

        tracing::debug!(task_id = %self.task.id, from = %current, to = %next, "task transitioned");
        Ok(())
    }

    fn invalid_transition(&self, next: TaskStatus) -> CoreError {
        CoreError::InvalidTransition {
            entity_type: "task".into(),
            id: self.task.id.clone(),
            from: self.task.status.to_string(),
            to: next.to_string(),
        }
    }

    /// Elapsed time from creation to completion; `None` until completed.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        task_duration(&self.task)
    }

    /// [`Self::duration`] in whole days, rounded up.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        completion_days(&self.task)
    }

    /// Read-only report view, or "not yet available" while running.
    #[must_use]
    pub fn report_view(&self, rate: &CostRate) -> ReportAvailability {
        aggregate(self.task.status, self.report.as_ref(), rate)
    }
}

fn check_report_owner(task: &Task, report: &DeliveryReport) -> Result<(), CoreError> {
    if report.task_id == task.id {
        return Ok(());
    }
    Err(CoreError::validation(
        "taskId",
        format!("report {} belongs to task {}, not {}", report.id, report.task_id, task.id),
    ))
}

/// Elapsed time from `created_at` to `completed_at`.
#[must_use]
pub fn task_duration(task: &Task) -> Option<Duration> {
    task.completed_at.map(|done| done - task.created_at)
}

/// Completion time in whole days, rounded up. `None` until completed.
#[must_use]
pub fn completion_days(task: &Task) -> Option<i64> {
    let secs = task_duration(task)?.num_seconds().max(0);
    Some((secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY)
}

/// Whether `statuses` only ever moves forward along allowed transitions.
#[must_use]
pub fn is_monotonic(statuses: &[TaskStatus]) -> bool {
    statuses
        .windows(2)
        .all(|pair| pair[0] == pair[1] || pair[0].can_transition_to(pair[1]))
}
