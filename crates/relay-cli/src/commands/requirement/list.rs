use relay_core::entities::Requirement;

use crate::cli::root_commands::RangeArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::rows::RequirementRow;
use crate::commands::shared::window::{has_explicit_range, resolve_window};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::with_spinner;

pub async fn run(
    pending: bool,
    range: &RangeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let space = ctx.space_id()?;
    let window = resolve_window(range, &ctx.config.board, AppContext::today())?;

    let mut requirements: Vec<Requirement> = if pending {
        let actor = ctx.actor()?;
        let mut pending = with_spinner(
            "Loading pending requirements",
            ctx.client.list_pending_requirements(space, &actor.user_id),
        )
        .await?;
        // Pending work is shown regardless of age unless dates were asked for.
        if has_explicit_range(range) {
            pending.retain(|r| window.contains(r.created_at));
        }
        pending
    } else {
        with_spinner(
            "Loading requirements",
            ctx.client.list_requirements(space, Some(&window)),
        )
        .await?
    };
    requirements.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

    match flags.format {
        OutputFormat::Table => {
            let rows: Vec<RequirementRow> = requirements.iter().map(RequirementRow::from).collect();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&requirements, flags.format),
    }
}
