use std::fmt::Write as _;

use relay_core::board::{Board, BoardQuery, BoardStats, project};
use relay_core::enums::Viewpoint;
use relay_core::window::DateWindow;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BoardArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::rows::{RequirementRow, TaskRow};
use crate::commands::shared::window::resolve_window;
use crate::context::AppContext;
use crate::output::{output_or_text, render_array_table};
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardOutput<'a> {
    view: Viewpoint,
    window: DateWindow,
    stats: BoardStats,
    lanes: &'a Board<'a>,
}

/// Handle `rly board`.
pub async fn handle(args: &BoardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view: Viewpoint = parse_enum(&args.view, "view")?;
    let window = resolve_window(&args.range, &ctx.config.board, AppContext::today())?;
    let space = ctx.space_id()?;
    let actor = match view {
        Viewpoint::Personal => Some(ctx.actor()?),
        Viewpoint::Team => None,
    };

    let (requirements, tasks) = with_spinner("Loading board", async {
        tokio::try_join!(
            ctx.client.list_requirements(space, Some(&window)),
            ctx.client.list_tasks(space),
        )
    })
    .await?;

    let query = match &actor {
        Some(actor) => BoardQuery::personal(&actor.user_id, window),
        None => BoardQuery::team(window),
    };
    let board = project(&requirements, &tasks, &query);
    let stats = board.stats();
    tracing::debug!(%view, %window, pool = stats.pool, tasks = stats.total_tasks, "board projected");

    let out = BoardOutput {
        view,
        window,
        stats,
        lanes: &board,
    };
    output_or_text(&out, flags.format, || render_board(&out))
}

fn render_board(out: &BoardOutput<'_>) -> String {
    let stats = &out.stats;
    let mut text = String::new();
    let _ = writeln!(text, "{} board, {}", out.view, out.window);
    let _ = writeln!(
        text,
        "pool {} | in progress {} | pending confirm {} | completed {} | avg {:.1} days",
        stats.pool,
        stats.in_progress,
        stats.pending_confirm,
        stats.completed,
        stats.average_completion_days
    );

    let pool: Vec<RequirementRow> = out.lanes.pool.iter().map(|r| RequirementRow::from(*r)).collect();
    push_lane(&mut text, "Requirement pool", &pool);
    for (title, lane) in [
        ("In progress", &out.lanes.in_progress),
        ("Pending confirmation", &out.lanes.pending_confirm),
        ("Completed", &out.lanes.completed),
    ] {
        let rows: Vec<TaskRow> = lane.iter().map(|t| TaskRow::from(*t)).collect();
        push_lane(&mut text, title, &rows);
    }
    text
}

fn push_lane<T: Serialize>(text: &mut String, title: &str, rows: &[T]) {
    let values = rows
        .iter()
        .filter_map(|row| serde_json::to_value(row).ok())
        .collect::<Vec<_>>();
    let _ = write!(text, "\n{title} ({})\n{}\n", rows.len(), render_array_table(&values));
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use relay_core::board::{BoardQuery, project};
    use relay_core::entities::{AssigneeStatus, Requirement};
    use relay_core::enums::{Priority, Viewpoint};
    use relay_core::window::DateWindow;

    use super::{BoardOutput, render_board};

    #[test]
    fn text_board_lists_every_lane() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2026, 10, 11).expect("date"),
            NaiveDate::from_ymd_opt(2026, 10, 17).expect("date"),
        )
        .expect("window");
        let requirements = vec![Requirement {
            id: "req-1".into(),
            space_id: "spc-1".into(),
            title: "Speed up home page".into(),
            description: String::new(),
            priority: Priority::High,
            source: "Jira".into(),
            source_url: None,
            image_url: None,
            document_url: None,
            created_by: "pm".into(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 12, 9, 0, 0).unwrap(),
            assignees: vec![AssigneeStatus::pending("u1", "Ada")],
        }];
        let board = project(&requirements, &[], &BoardQuery::team(window));
        let out = BoardOutput {
            view: Viewpoint::Team,
            window,
            stats: board.stats(),
            lanes: &board,
        };

        let text = render_board(&out);

        assert!(text.starts_with("team board, 2026-10-11..=2026-10-17\n"));
        assert!(text.contains("Requirement pool (1)"));
        assert!(text.contains("0/1"));
        assert!(text.contains("Completed (0)\n(no rows)"));
    }
}
