use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Board(args) => commands::board::handle(&args, ctx, flags).await,
        Commands::Requirement { action } => commands::requirement::handle(&action, ctx, flags).await,
        Commands::Dispatch(args) => commands::requirement::dispatch::run(&args, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
    }
}
