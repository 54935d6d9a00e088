//! Plain-text rendering of conversation turns.
//!
//! Used by terminal views. Tree and todo nodes honour the viewer's
//! [`ExpansionState`]; a payload that cannot be rendered falls back to the
//! turn's plain `content` and is reported with `warn!`.

use std::fmt::{self, Write as _};

use crate::content::{Fallback, Progress, StructuredContent, TodoItem, TreeNode};
use crate::entities::ConversationTurn;
use crate::enums::{AnalysisLevel, WorkStatus};
use crate::expansion::{ExpansionState, NodeFamily};
use crate::log::ConversationLog;

const BAR_WIDTH: usize = 20;

/// A turn prepared for display.
pub struct TurnView<'a> {
    turn: &'a ConversationTurn,
    expansion: &'a ExpansionState,
    structured: Option<Result<&'a StructuredContent, Fallback>>,
}

impl<'a> TurnView<'a> {
    pub fn new(turn: &'a ConversationTurn, expansion: &'a ExpansionState) -> Self {
        let structured = turn.structured_content.as_ref().map(|payload| {
            let resolved = payload.resolve();
            if let Err(reason) = &resolved {
                tracing::warn!(turn_id = %turn.id, %reason, "rendering structured content as plain text");
            }
            resolved
        });
        Self {
            turn,
            expansion,
            structured,
        }
    }

    /// Why the structured payload was dropped, if it was.
    #[must_use]
    pub fn fallback(&self) -> Option<&Fallback> {
        match &self.structured {
            Some(Err(reason)) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for TurnView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = self.turn;
        write!(f, "[{}] {}", turn.role, turn.created_at.format("%Y-%m-%d %H:%M"))?;
        if let Some(step) = &turn.step {
            write!(f, " · {step}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", turn.content)?;

        if let Some(Ok(content)) = &self.structured {
            let mut body = String::new();
            write_content(&mut body, &turn.id, content, self.expansion)?;
            f.write_str(&body)?;
        }
        Ok(())
    }
}

/// Render one turn.
#[must_use]
pub fn render_turn(turn: &ConversationTurn, expansion: &ExpansionState) -> String {
    TurnView::new(turn, expansion).to_string()
}

/// Render a whole log, separating turns with a blank line.
#[must_use]
pub fn render_log(log: &ConversationLog, expansion: &ExpansionState) -> String {
    log.turns()
        .iter()
        .map(|turn| render_turn(turn, expansion))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_content(
    out: &mut String,
    turn_id: &str,
    content: &StructuredContent,
    expansion: &ExpansionState,
) -> fmt::Result {
    match content {
        StructuredContent::Text { text } => writeln!(out, "{text}"),
        StructuredContent::Tree { tree } => {
            for node in tree {
                write_tree(out, turn_id, node, 0, expansion)?;
            }
            Ok(())
        }
        StructuredContent::Todo { todos } => {
            for item in todos {
                write_todo(out, turn_id, item, 0, expansion)?;
            }
            Ok(())
        }
        StructuredContent::Code { code } => {
            writeln!(out, "```{}", code.language)?;
            if let Some(name) = &code.file_name {
                writeln!(out, "// {name}")?;
            }
            writeln!(out, "{}", code.content)?;
            writeln!(out, "```")
        }
        StructuredContent::Progress { progress } => writeln!(out, "{}", progress_bar(progress)),
        StructuredContent::Analysis { analysis } => {
            for row in analysis {
                writeln!(out, "{} {}: {}", level_marker(row.level), row.label, row.value)?;
            }
            Ok(())
        }
    }
}

fn write_tree(
    out: &mut String,
    turn_id: &str,
    node: &TreeNode,
    depth: usize,
    expansion: &ExpansionState,
) -> fmt::Result {
    let open = expansion.is_expanded(turn_id, NodeFamily::Tree, &node.key);
    let marker = match (node.children.is_empty(), open) {
        (true, _) => "-",
        (false, true) => "v",
        (false, false) => ">",
    };
    write!(out, "{:indent$}{marker} {}", "", node.title, indent = depth * 2)?;
    if let Some(status) = node.status {
        write!(out, " ({status})")?;
    }
    writeln!(out)?;
    if open {
        for child in &node.children {
            write_tree(out, turn_id, child, depth + 1, expansion)?;
        }
    }
    Ok(())
}

fn write_todo(
    out: &mut String,
    turn_id: &str,
    item: &TodoItem,
    depth: usize,
    expansion: &ExpansionState,
) -> fmt::Result {
    let open = expansion.is_expanded(turn_id, NodeFamily::Todo, &item.id);
    let label = match (&item.active_form, item.status) {
        (Some(active), WorkStatus::InProgress) => active.as_str(),
        _ => item.content.as_str(),
    };
    write!(
        out,
        "{:indent$}{} {label}",
        "",
        checkbox(item.status),
        indent = depth * 2
    )?;
    let hidden = item.children.len() + usize::from(item.code.is_some());
    if !open && hidden > 0 {
        write!(out, " (+{hidden})")?;
    }
    writeln!(out)?;
    if !open {
        return Ok(());
    }
    if let Some(snippet) = &item.code {
        let pad = (depth + 1) * 2;
        writeln!(out, "{:pad$}```{}", "", snippet.language)?;
        for line in snippet.content.lines() {
            writeln!(out, "{:pad$}{line}", "")?;
        }
        writeln!(out, "{:pad$}```", "")?;
    }
    for child in &item.children {
        write_todo(out, turn_id, child, depth + 1, expansion)?;
    }
    Ok(())
}

const fn checkbox(status: WorkStatus) -> &'static str {
    match status {
        WorkStatus::Pending => "[ ]",
        WorkStatus::InProgress => "[~]",
        WorkStatus::Completed => "[x]",
    }
}

const fn level_marker(level: AnalysisLevel) -> &'static str {
    match level {
        AnalysisLevel::Info => "i",
        AnalysisLevel::Success => "+",
        AnalysisLevel::Warning => "!",
        AnalysisLevel::Error => "x",
    }
}

fn progress_bar(progress: &Progress) -> String {
    let pct = progress.percent();
    let filled = usize::from(pct) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {pct:>3}% {}/{} {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.current,
        progress.total,
        progress.message
    )
}
