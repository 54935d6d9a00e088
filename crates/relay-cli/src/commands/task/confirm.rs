use serde_json::json;

use crate::cli::GlobalFlags;
use crate::commands::shared::payload::keep_payload_on_failure;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let result = with_spinner("Confirming delivery", ctx.client.confirm_task(id)).await;
    let task = keep_payload_on_failure(result, &json!({ "taskId": id }), "confirmation")?;
    output(&task, flags.format)
}
