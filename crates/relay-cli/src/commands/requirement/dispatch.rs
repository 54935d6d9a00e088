use relay_core::dispatch::DispatchRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DispatchArgs;
use crate::commands::shared::payload::keep_payload_on_failure;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

/// Handle `rly dispatch`.
pub async fn run(args: &DispatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let request = build_request(args, &actor.user_id);

    let result = with_spinner(
        &format!("Dispatching {}", args.requirement_id),
        ctx.client.dispatch(&args.requirement_id, &request),
    )
    .await;
    let task = keep_payload_on_failure(result, &request, "dispatch")?;

    tracing::info!(task_id = %task.id, requirement_id = %args.requirement_id, "dispatched");
    output(&task, flags.format)
}

fn build_request(args: &DispatchArgs, user_id: &str) -> DispatchRequest {
    DispatchRequest {
        supplemental_text: args
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string),
        git_repos: args.repos.clone(),
        ..DispatchRequest::new(user_id)
    }
}
