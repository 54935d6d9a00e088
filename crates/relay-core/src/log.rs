//! Append-only conversation log of a task.
//!
//! Turns are kept in creation order and are never reordered or removed. The
//! log accepts new turns only while its task is `in_progress`; the owning
//! task's status is passed in on every append so the log cannot drift from
//! the lifecycle.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content::ContentPayload;
use crate::entities::ConversationTurn;
use crate::enums::TaskStatus;
use crate::errors::CoreError;

/// Ordered turns belonging to one task.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationLog {
    task_id: String,
    turns: Vec<ConversationTurn>,
}

/// First turn of an execution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepAnchor<'a> {
    pub first_turn_id: &'a str,
    pub step: &'a str,
}

/// Owned navigation entry, one per distinct step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutlineEntry {
    /// ID of the turn the entry jumps to.
    pub id: String,
    pub title: String,
}

impl ConversationLog {
    /// An empty log for `task_id`.
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            turns: Vec::new(),
        }
    }

    /// Rebuild a log from turns fetched from the backend.
    ///
    /// Turns are checked, not sorted: the backend is the ordering authority
    /// and an out-of-order page indicates a broken contract.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if a turn belongs to another task,
    /// appears twice, or is older than its predecessor.
    pub fn from_turns(
        task_id: impl Into<String>,
        turns: Vec<ConversationTurn>,
    ) -> Result<Self, CoreError> {
        let mut log = Self::new(task_id);
        for turn in turns {
            log.check_next(&turn)?;
            log.turns.push(turn);
        }
        Ok(log)
    }

    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Append `turn` at the tail.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LogClosed`] unless `status` is `in_progress`, and
    /// [`CoreError::Validation`] if the turn breaks ordering or ownership, or
    /// carries a structured payload that violates its invariants.
    pub fn append(
        &mut self,
        status: TaskStatus,
        turn: ConversationTurn,
    ) -> Result<&ConversationTurn, CoreError> {
        if !status.accepts_turns() {
            return Err(CoreError::LogClosed {
                task_id: self.task_id.clone(),
                status: status.to_string(),
            });
        }
        self.check_next(&turn)?;
        match &turn.structured_content {
            Some(ContentPayload::Known(content)) => content.validate()?,
            Some(ContentPayload::Unrecognized(_)) => {
                tracing::debug!(turn_id = %turn.id, "accepting unrecognized structured content");
            }
            None => {}
        }

        tracing::debug!(task_id = %self.task_id, turn_id = %turn.id, "appended conversation turn");
        self.turns.push(turn);
        Ok(&self.turns[self.turns.len() - 1])
    }

    fn check_next(&self, turn: &ConversationTurn) -> Result<(), CoreError> {
        if turn.task_id != self.task_id {
            return Err(CoreError::validation(
                "taskId",
                format!(
                    "turn {} belongs to task {}, not {}",
                    turn.id, turn.task_id, self.task_id
                ),
            ));
        }
        if self.turns.iter().any(|existing| existing.id == turn.id) {
            return Err(CoreError::validation(
                "id",
                format!("turn {} is already in the log", turn.id),
            ));
        }
        if let Some(last) = self.turns.last() {
            if turn.created_at < last.created_at {
                return Err(CoreError::validation(
                    "createdAt",
                    format!("turn {} is older than turn {}", turn.id, last.id),
                ));
            }
        }
        Ok(())
    }

    /// First turn of each distinct step, in first-occurrence order.
    ///
    /// Lazy; call again to restart.
    #[must_use]
    pub fn turns_by_step(&self) -> StepAnchors<'_> {
        StepAnchors {
            turns: self.turns.iter(),
            seen: HashSet::new(),
        }
    }

    /// Collected [`Self::turns_by_step`] for navigation.
    #[must_use]
    pub fn outline(&self) -> Vec<OutlineEntry> {
        self.turns_by_step()
            .map(|anchor| OutlineEntry {
                id: anchor.first_turn_id.to_string(),
                title: anchor.step.to_string(),
            })
            .collect()
    }
}

/// Iterator returned by [`ConversationLog::turns_by_step`].
#[derive(Debug, Clone)]
pub struct StepAnchors<'a> {
    turns: std::slice::Iter<'a, ConversationTurn>,
    seen: HashSet<&'a str>,
}

impl<'a> Iterator for StepAnchors<'a> {
    type Item = StepAnchor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for turn in self.turns.by_ref() {
            let Some(step) = turn.step.as_deref() else {
                continue;
            };
            if self.seen.insert(step) {
                return Some(StepAnchor {
                    first_turn_id: &turn.id,
                    step,
                });
            }
        }
        None
    }
}
