mod confirm;
mod get;
mod list;
mod log;
mod report;
mod submit;
mod wait;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::context::AppContext;

/// Handle `rly task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::List { status, mine } => list::run(status.as_deref(), *mine, ctx, flags).await,
        TaskCommands::Get { id } => get::run(id, ctx, flags).await,
        TaskCommands::Submit {
            description,
            title,
            repos,
            key,
        } => {
            submit::run(
                description,
                title.as_deref(),
                repos,
                key.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        TaskCommands::Log {
            id,
            expand,
            collapse,
        } => log::run(id, expand, collapse, ctx, flags).await,
        TaskCommands::Report { id } => report::run(id, ctx, flags).await,
        TaskCommands::Confirm { id } => confirm::run(id, ctx, flags).await,
        TaskCommands::Wait { id, report } => wait::run(id, *report, ctx, flags).await,
    }
}
