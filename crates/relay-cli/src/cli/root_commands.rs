use chrono::NaiveDate;
use clap::{Args, Subcommand};
use relay_core::entities::TaskGitRepo;

use crate::cli::subcommands::{RequirementCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Requirement pool and task lanes for a date range.
    Board(BoardArgs),
    /// Incoming requirements.
    Requirement {
        #[command(subcommand)]
        action: RequirementCommands,
    },
    /// Start an agent task from a requirement assigned to you.
    Dispatch(DispatchArgs),
    /// Agent tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
}

/// Date filter shared by `board` and `requirement list`.
#[derive(Clone, Debug, Default, Args)]
pub struct RangeArgs {
    /// this_week, last_week, this_month (defaults to `board.default_range`).
    #[arg(long)]
    pub range: Option<String>,
    /// First day of a custom range (YYYY-MM-DD).
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// Last day of a custom range (YYYY-MM-DD).
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

/// Arguments for `rly board`.
#[derive(Clone, Debug, Args)]
pub struct BoardArgs {
    /// team or personal.
    #[arg(long, default_value = "team")]
    pub view: String,
    #[command(flatten)]
    pub range: RangeArgs,
}

/// Arguments for `rly dispatch`.
#[derive(Clone, Debug, Args)]
pub struct DispatchArgs {
    pub requirement_id: String,
    /// Extra instructions appended to the requirement description.
    #[arg(long)]
    pub note: Option<String>,
    /// Repository to work against, as `id:name:branch`. Repeatable.
    #[arg(long = "repo", value_parser = parse_repo_arg)]
    pub repos: Vec<TaskGitRepo>,
}

/// Parse `id:name:branch`. The branch may itself contain `:`.
pub fn parse_repo_arg(raw: &str) -> Result<TaskGitRepo, String> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(name), Some(branch)) if !id.trim().is_empty() => Ok(TaskGitRepo {
            git_repo_id: id.trim().to_string(),
            git_repo_name: name.trim().to_string(),
            base_branch: branch.trim().to_string(),
        }),
        _ => Err(format!("expected id:name:branch, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_repo_arg;

    #[test]
    fn repo_spec_keeps_colons_in_branch() {
        let repo = parse_repo_arg("g1:web:release:2026").expect("should parse");
        assert_eq!(repo.git_repo_id, "g1");
        assert_eq!(repo.git_repo_name, "web");
        assert_eq!(repo.base_branch, "release:2026");
    }

    #[test]
    fn repo_spec_allows_blank_branch_for_later_validation() {
        let repo = parse_repo_arg("g1:web:").expect("should parse");
        assert!(repo.base_branch.is_empty());
    }

    #[test]
    fn repo_spec_needs_three_parts() {
        assert!(parse_repo_arg("g1:web").is_err());
        assert!(parse_repo_arg(":web:main").is_err());
    }
}
