use std::fmt::Write as _;

use relay_core::report::{ChangeGroup, ReportAvailability, ReportView};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::{output_or_text, render_array_table};
use crate::progress::with_spinner;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rate = ctx.cost_rate();
    let availability =
        with_spinner("Loading report", ctx.client.report_availability(id, &rate)).await?;
    output_or_text(&availability, flags.format, || render_availability(&availability))
}

pub fn render_availability(availability: &ReportAvailability) -> String {
    match availability {
        ReportAvailability::NotYetAvailable { status } => {
            format!("Report not yet available (task is {status}).")
        }
        ReportAvailability::Available(view) => render_report(view),
    }
}

fn render_report(view: &ReportView) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{} ({})", view.task_title, view.task_id);
    let _ = writeln!(
        text,
        "status {} | {} tokens | est. {}",
        view.status, view.token_consumed, view.cost
    );
    if let Some(url) = &view.requirement_url {
        let _ = writeln!(text, "requirement {url}");
    }

    if !view.impact.is_empty() {
        let rows = view
            .impact
            .iter()
            .map(|row| {
                json!({
                    "module": row.module,
                    "severity": row.severity.to_string(),
                    "description": row.description,
                })
            })
            .collect::<Vec<_>>();
        section(&mut text, "Impact", &rows);
    }

    if !view.merge_requests.is_empty() {
        let rows = view
            .merge_requests
            .iter()
            .map(|mr| json!({"repo": mr.git_repo_name, "status": mr.status, "url": mr.mr_url}))
            .collect::<Vec<_>>();
        section(&mut text, "Merge requests", &rows);
    }

    grouped(&mut text, "Code changes", &view.code_changes, |c| {
        json!({"file": c.file_path, "change": c.change_type})
    });
    grouped(&mut text, "Database changes", &view.database_changes, |c| {
        json!({"sql": c.sql_script, "description": c.description})
    });
    grouped(&mut text, "Config changes", &view.config_changes, |c| {
        json!({"key": c.config_key, "old": c.old_value, "new": c.new_value})
    });
    text
}

fn grouped<T: Serialize>(
    text: &mut String,
    title: &str,
    groups: &[ChangeGroup<T>],
    row: impl Fn(&T) -> Value,
) {
    for group in groups {
        let rows = group.items.iter().map(&row).collect::<Vec<_>>();
        section(text, &format!("{title}: {}", group.key), &rows);
    }
}

fn section(text: &mut String, title: &str, rows: &[Value]) {
    let _ = write!(text, "\n{title} ({})\n{}\n", rows.len(), render_array_table(rows));
}

#[cfg(test)]
mod tests {
    use relay_core::enums::TaskStatus;
    use relay_core::report::ReportAvailability;

    use super::render_availability;

    #[test]
    fn running_task_explains_missing_report() {
        let text = render_availability(&ReportAvailability::NotYetAvailable {
            status: TaskStatus::InProgress,
        });
        assert_eq!(text, "Report not yet available (task is in_progress).");
    }
}
