use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content::{ContentPayload, StructuredContent};
use crate::enums::Role;

/// One entry in a task's append-only execution log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub id: String,
    pub task_id: String,
    pub role: Role,
    /// Plain-text form; always present and used as the rendering fallback.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<ContentPayload>,
    /// Phase label; turns sharing a step form one execution phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Turn payload before it is assigned an ID and timestamp
/// (`POST /tasks/{id}/conversations`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTurn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<StructuredContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

impl NewTurn {
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            structured_content: None,
            step: None,
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: StructuredContent) -> Self {
        self.structured_content = Some(content);
        self
    }
}
