use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat, ProgressMode};
pub use root_commands::Commands;

/// Top-level CLI parser for the `rly` binary.
#[derive(Debug, Parser)]
#[command(
    name = "rly",
    version,
    about = "Relay - dispatch requirements to AI agents and review what they deliver"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colorize table output
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Show spinners while waiting on the backend
    #[arg(long, global = true, default_value = "auto")]
    pub progress: ProgressMode,

    /// Act as this user instead of the configured one
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Work in this space instead of the configured one
    #[arg(short, long, global = true)]
    pub space: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            progress: self.progress,
            user: self.user.clone(),
            space: self.space.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{RequirementCommands, TaskCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["rly", "--format", "json", "--verbose", "board"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Board(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["rly", "requirement", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Requirement {
                action: RequirementCommands::List { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["rly", "--format", "xml", "board"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn identity_overrides_are_copied() {
        let cli = Cli::try_parse_from(["rly", "--user", "u2", "--space", "spc-9", "task", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.user.as_deref(), Some("u2"));
        assert_eq!(flags.space.as_deref(), Some("spc-9"));
        assert!(matches!(
            cli.command,
            Commands::Task {
                action: TaskCommands::List { .. }
            }
        ));
    }

    #[test]
    fn dispatch_accepts_repeated_repos() {
        let cli = Cli::try_parse_from([
            "rly",
            "dispatch",
            "req-1",
            "--note",
            "Focus on images",
            "--repo",
            "g1:web:main",
            "--repo",
            "g2:api:develop",
        ])
        .expect("cli should parse");
        let Commands::Dispatch(args) = cli.command else {
            panic!("expected dispatch");
        };
        assert_eq!(args.requirement_id, "req-1");
        assert_eq!(args.repos.len(), 2);
        assert_eq!(args.repos[1].base_branch, "develop");
    }

    #[test]
    fn malformed_repo_spec_is_rejected() {
        let parsed = Cli::try_parse_from(["rly", "dispatch", "req-1", "--repo", "web"]);
        assert!(parsed.is_err());
    }
}
