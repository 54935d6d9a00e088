use relay_core::report::aggregate;

use crate::cli::GlobalFlags;
use crate::commands::task::report::render_availability;
use crate::context::AppContext;
use crate::output::{output, output_or_text};
use crate::progress::with_spinner;

pub async fn run(id: &str, report: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let task = with_spinner(
        &format!("Waiting for agent on {id}"),
        ctx.client.wait_for_task(id),
    )
    .await?;

    if !report {
        return output(&task, flags.format);
    }

    let delivered = with_spinner(
        &format!("Waiting for delivery report on {id}"),
        ctx.client.wait_for_report(id),
    )
    .await?;
    let availability = aggregate(task.status, Some(&delivered), &ctx.cost_rate());
    output_or_text(&availability, flags.format, || render_availability(&availability))
}
