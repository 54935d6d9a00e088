//! Structured content attached to conversation turns.
//!
//! [`StructuredContent`] is a closed sum type: every consumer matches on it
//! exhaustively. On the wire it is internally tagged by `type`, with the
//! payload under the variant's own key:
//!
//! ```json
//! { "type": "progress", "progress": { "current": 3, "total": 3, "message": "done" } }
//! ```
//!
//! Turns written by a newer producer may carry a `type` this reader does not
//! know, or a payload missing required fields. Those deserialize into
//! [`ContentPayload::Unrecognized`], keep their raw JSON for re-serialization,
//! and render as the turn's plain-text content.

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AnalysisLevel, TodoKind, WorkStatus};
use crate::errors::CoreError;

/// One renderable unit of agent output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StructuredContent {
    Text { text: String },
    Tree { tree: Vec<TreeNode> },
    Todo { todos: Vec<TodoItem> },
    Code { code: CodeBlock },
    Progress { progress: Progress },
    Analysis { analysis: Vec<AnalysisRow> },
}

/// Discriminant of [`StructuredContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Tree,
    Todo,
    Code,
    Progress,
    Analysis,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Tree => "tree",
            Self::Todo => "todo",
            Self::Code => "code",
            Self::Progress => "progress",
            Self::Analysis => "analysis",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a dependency/structure tree. Children are unordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeNode {
    pub key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// An item of a hierarchical todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub content: String,
    pub status: WorkStatus,
    #[serde(rename = "type", default)]
    pub kind: TodoKind,
    /// Present-tense label shown while the item is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_form: Option<String>,
    /// Embedded snippet; only on `code` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Snippet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TodoItem>,
}

/// Source snippet embedded in a `code` todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Snippet {
    pub language: String,
    pub content: String,
}

/// A standalone code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub language: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A progress indicator. `current` never exceeds `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Progress {
    pub current: u32,
    pub total: u32,
    pub message: String,
}

impl Progress {
    /// Build a progress indicator, rejecting `current > total`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `current` exceeds `total`.
    pub fn new(current: u32, total: u32, message: impl Into<String>) -> Result<Self, CoreError> {
        let progress = Self {
            current,
            total,
            message: message.into(),
        };
        progress.validate()?;
        Ok(progress)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `current` exceeds `total`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.current > self.total {
            return Err(CoreError::validation(
                "progress.current",
                format!(
                    "current ({}) must not exceed total ({})",
                    self.current, self.total
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    /// Completion percentage, 0..=100. An empty total counts as complete.
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = u64::from(self.current.min(self.total)) * 100 / u64::from(self.total);
        u8::try_from(pct).unwrap_or(100)
    }

    /// Move `current` forward by `step`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the result would pass `total`.
    pub fn advance(&mut self, step: u32) -> Result<(), CoreError> {
        let next = self.current.saturating_add(step);
        if next > self.total {
            return Err(CoreError::validation(
                "progress.current",
                format!("cannot advance past total ({})", self.total),
            ));
        }
        self.current = next;
        Ok(())
    }
}

/// One labelled row of a tabular analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRow {
    pub label: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub level: AnalysisLevel,
}

impl StructuredContent {
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Text { .. } => ContentKind::Text,
            Self::Tree { .. } => ContentKind::Tree,
            Self::Todo { .. } => ContentKind::Todo,
            Self::Code { .. } => ContentKind::Code,
            Self::Progress { .. } => ContentKind::Progress,
            Self::Analysis { .. } => ContentKind::Analysis,
        }
    }

    /// Check the payload invariants enforced at ingestion.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for progress overflow, misplaced
    /// snippets on todo items, or duplicate node keys.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::Text { .. } | Self::Code { .. } | Self::Analysis { .. } => Ok(()),
            Self::Progress { progress } => progress.validate(),
            Self::Tree { tree } => {
                let mut seen = HashSet::new();
                validate_tree(tree, &mut seen)
            }
            Self::Todo { todos } => {
                let mut seen = HashSet::new();
                validate_todos(todos, &mut seen)
            }
        }
    }
}

fn validate_tree<'a>(nodes: &'a [TreeNode], seen: &mut HashSet<&'a str>) -> Result<(), CoreError> {
    for node in nodes {
        if !seen.insert(node.key.as_str()) {
            return Err(CoreError::validation(
                "tree.key",
                format!("duplicate node key '{}'", node.key),
            ));
        }
        validate_tree(&node.children, seen)?;
    }
    Ok(())
}

fn validate_todos<'a>(items: &'a [TodoItem], seen: &mut HashSet<&'a str>) -> Result<(), CoreError> {
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(CoreError::validation(
                "todos.id",
                format!("duplicate todo id '{}'", item.id),
            ));
        }
        match item.kind {
            TodoKind::Code => {
                if item.code.is_none() {
                    return Err(CoreError::validation(
                        "todos.code",
                        format!("code item '{}' has no snippet", item.id),
                    ));
                }
                if !item.children.is_empty() {
                    return Err(CoreError::validation(
                        "todos.children",
                        format!("code item '{}' cannot have children", item.id),
                    ));
                }
            }
            TodoKind::Task | TodoKind::Repo | TodoKind::File => {
                if item.code.is_some() {
                    return Err(CoreError::validation(
                        "todos.code",
                        format!("{} item '{}' cannot carry a snippet", item.kind, item.id),
                    ));
                }
            }
        }
        validate_todos(&item.children, seen)?;
    }
    Ok(())
}

/// Structured payload as stored on a turn.
///
/// Deserialization tries the known variants first; anything else is kept
/// verbatim so it survives a round trip through an older reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ContentPayload {
    Known(StructuredContent),
    Unrecognized(serde_json::Value),
}

/// Why a payload is rendered as plain text instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// `type` names a variant this reader does not know.
    UnknownType(String),
    /// The `type` is known (or absent) but the payload does not match it.
    Malformed(Option<String>),
    /// The payload parsed but breaks an invariant.
    Invalid(CoreError),
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(kind) => write!(f, "unknown content type '{kind}'"),
            Self::Malformed(Some(kind)) => write!(f, "malformed '{kind}' payload"),
            Self::Malformed(None) => f.write_str("payload has no content type"),
            Self::Invalid(err) => write!(f, "invalid payload: {err}"),
        }
    }
}

const KNOWN_KINDS: [&str; 6] = ["text", "tree", "todo", "code", "progress", "analysis"];

impl ContentPayload {
    /// The typed content, or the reason it cannot be rendered as such.
    ///
    /// # Errors
    ///
    /// Returns a [`Fallback`] when the payload is unknown, malformed, or
    /// violates a content invariant.
    pub fn resolve(&self) -> Result<&StructuredContent, Fallback> {
        match self {
            Self::Known(content) => {
                content.validate().map_err(Fallback::Invalid)?;
                Ok(content)
            }
            Self::Unrecognized(raw) => {
                let kind = raw
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string);
                Err(match kind {
                    Some(kind) if !KNOWN_KINDS.contains(&kind.as_str()) => {
                        Fallback::UnknownType(kind)
                    }
                    other => Fallback::Malformed(other),
                })
            }
        }
    }
}

impl From<StructuredContent> for ContentPayload {
    fn from(content: StructuredContent) -> Self {
        Self::Known(content)
    }
}
