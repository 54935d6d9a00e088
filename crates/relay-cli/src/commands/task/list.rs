use relay_core::entities::Task;
use relay_core::enums::TaskStatus;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::rows::TaskRow;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(
    status: Option<&str>,
    mine: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status
        .map(|raw| parse_enum::<TaskStatus>(raw, "status"))
        .transpose()?;
    let created_by = if mine { Some(ctx.actor()?.user_id) } else { None };
    let space = ctx.space_id()?;

    let tasks = with_spinner("Loading tasks", ctx.client.list_tasks(space)).await?;
    let tasks = filter_tasks(tasks, status, created_by.as_deref());

    match flags.format {
        OutputFormat::Table => {
            let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&tasks, flags.format),
    }
}

fn filter_tasks(mut tasks: Vec<Task>, status: Option<TaskStatus>, created_by: Option<&str>) -> Vec<Task> {
    if let Some(status) = status {
        tasks.retain(|task| task.status == status);
    }
    if let Some(user) = created_by {
        tasks.retain(|task| task.created_by == user);
    }
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    tasks
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use relay_core::entities::Task;
    use relay_core::enums::TaskStatus;

    use super::filter_tasks;

    fn task(id: &str, status: TaskStatus, by: &str, hour: u32) -> Task {
        let at = Utc.with_ymd_and_hms(2026, 10, 12, hour, 0, 0).unwrap();
        Task {
            id: id.into(),
            space_id: "spc-1".into(),
            requirement_id: None,
            title: id.into(),
            description: String::new(),
            status,
            created_by: by.into(),
            created_at: at,
            updated_at: at,
            completed_at: None,
            git_repos: vec![],
        }
    }

    #[test]
    fn filters_by_status_and_creator_newest_first() {
        let tasks = vec![
            task("a", TaskStatus::InProgress, "u1", 8),
            task("b", TaskStatus::InProgress, "u2", 9),
            task("c", TaskStatus::InProgress, "u1", 10),
            task("d", TaskStatus::Completed, "u1", 11),
        ];
        let ids: Vec<String> = filter_tasks(tasks, Some(TaskStatus::InProgress), Some("u1"))
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["c", "a"]);
    }
}
