use std::fmt::Write as _;

use relay_core::expansion::ExpansionState;
use relay_core::log::ConversationLog;
use relay_core::render::render_log;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_node_ref;
use crate::context::AppContext;
use crate::output::output_or_text;
use crate::progress::with_spinner;

pub async fn run(
    id: &str,
    expand: &[String],
    collapse: &[String],
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let expansion = expansion_from(expand, collapse)?;
    let log = with_spinner("Loading execution log", ctx.client.load_log(id)).await?;
    output_or_text(&log.turns(), flags.format, || render_with_outline(&log, &expansion))
}

fn expansion_from(expand: &[String], collapse: &[String]) -> anyhow::Result<ExpansionState> {
    let mut state = ExpansionState::new();
    for (raw, open) in expand
        .iter()
        .map(|raw| (raw, true))
        .chain(collapse.iter().map(|raw| (raw, false)))
    {
        let node = parse_node_ref(raw)?;
        state.set(&node.turn_id, node.family, &node.key, open);
    }
    Ok(state)
}

fn render_with_outline(log: &ConversationLog, expansion: &ExpansionState) -> String {
    if log.is_empty() {
        return format!("{}: no conversation yet", log.task_id());
    }
    let mut text = String::new();
    let outline = log.outline();
    if !outline.is_empty() {
        text.push_str("Steps:\n");
        for (n, entry) in outline.iter().enumerate() {
            let _ = writeln!(text, "  {}. {} ({})", n + 1, entry.title, entry.id);
        }
        text.push('\n');
    }
    text.push_str(&render_log(log, expansion));
    text
}
