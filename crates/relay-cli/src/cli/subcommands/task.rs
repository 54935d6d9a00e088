use clap::Subcommand;
use relay_core::entities::TaskGitRepo;

use crate::cli::root_commands::parse_repo_arg;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks in the current space.
    List {
        /// in_progress, pending_confirm or completed.
        #[arg(long)]
        status: Option<String>,
        /// Only tasks you created.
        #[arg(long)]
        mine: bool,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Submit a freestanding task.
    Submit {
        /// What the agent should do. The first line becomes the title unless
        /// `--title` is given.
        description: String,
        #[arg(long)]
        title: Option<String>,
        /// Repository to work against, as `id:name:branch`. Repeatable.
        #[arg(long = "repo", value_parser = parse_repo_arg)]
        repos: Vec<TaskGitRepo>,
        /// Idempotency key; reuse it when re-running a failed submission.
        #[arg(long)]
        key: Option<String>,
    },
    /// Show the execution log.
    Log {
        id: String,
        /// Expand a collapsed node, as `turn:family:key` (family: tree or todo).
        #[arg(long)]
        expand: Vec<String>,
        /// Collapse an expanded node, as `turn:family:key`.
        #[arg(long)]
        collapse: Vec<String>,
    },
    /// Show the delivery report.
    Report { id: String },
    /// Accept the agent's delivery.
    Confirm { id: String },
    /// Wait until the agent finishes.
    Wait {
        id: String,
        /// Also wait for the delivery report.
        #[arg(long)]
        report: bool,
    },
}
