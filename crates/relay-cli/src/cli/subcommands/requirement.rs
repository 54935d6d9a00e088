use clap::Subcommand;

use crate::cli::root_commands::RangeArgs;

/// Requirement commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RequirementCommands {
    /// List requirements created in a date range.
    List {
        /// Only requirements still waiting on your dispatch.
        #[arg(long)]
        pending: bool,
        #[command(flatten)]
        range: RangeArgs,
    },
}
