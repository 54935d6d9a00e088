pub mod dispatch;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequirementCommands;
use crate::context::AppContext;

/// Handle `rly requirement`.
pub async fn handle(
    action: &RequirementCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RequirementCommands::List { pending, range } => list::run(*pending, range, ctx, flags).await,
    }
}
