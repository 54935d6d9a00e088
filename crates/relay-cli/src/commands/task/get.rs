use relay_core::entities::Task;
use relay_core::lifecycle::completion_days;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskDetail {
    #[serde(flatten)]
    task: Task,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion_days: Option<i64>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = with_spinner("Loading task", ctx.client.get_task(id)).await?;
    let detail = TaskDetail {
        completion_days: completion_days(&task),
        task,
    };
    output(&detail, flags.format)
}
