use relay_core::entities::{NewTask, TaskGitRepo};
use relay_core::ids::{IdGenerator, RandomIds};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::payload::keep_payload_on_failure;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// What gets echoed back when a submission may not have landed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Submission<'a> {
    idempotency_key: &'a str,
    #[serde(flatten)]
    task: &'a NewTask,
}

pub async fn run(
    description: &str,
    title: Option<&str>,
    repos: &[TaskGitRepo],
    key: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let submission = NewTask {
        space_id: ctx.space_id()?.to_string(),
        title: title.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string),
        description: description.to_string(),
        git_repos: repos.to_vec(),
    };
    let key = key.map_or_else(|| RandomIds.generate_id("submit"), str::to_string);

    let result = with_spinner("Submitting task", ctx.client.create_task(&submission, &key)).await;
    let task = keep_payload_on_failure(
        result,
        &Submission {
            idempotency_key: &key,
            task: &submission,
        },
        "task submission",
    )?;

    tracing::info!(task_id = %task.id, key = %key, "task submitted");
    output(&task, flags.format)
}
