use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use great_scott_cli::{logging, output};
use great_scott_config::Config;
use std::process;
use tracing::debug;

mod cli;

#[derive(Parser)]
#[command(name = "great-scott")]
#[command(
    about = "A simple tool to automatically, when changing git branches, reverse migrations in a Django application."
)]
#[command(version, disable_version_flag = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Installs git hooks
    Install,
    /// Uninstalls git hooks
    Uninstall,
    /// Reverses migrations
    Reverse {
        /// Branch being checked out; migrations it lacks are reversed
        #[arg(long)]
        dst_branch: String,
    },
}

/// `-v` as well as `--version`, which clap's generated flag does not offer
fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

fn main() {
    let matches = command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let Some(subcommand) = cli.command else {
        let _ = command().print_help();
        return;
    };

    if let Err(e) = run(subcommand) {
        output::fail(&e);
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    if config.no_color {
        colored::control::set_override(false);
    }
    logging::init(&config.log_filter);
    if let Some(path) = &config.env_file {
        debug!("Loaded environment from {}", path.display());
    }
    debug!("Using {:?}", config);

    match command {
        Commands::Install => cli::hooks::install(),
        Commands::Uninstall => cli::hooks::uninstall(),
        Commands::Reverse { dst_branch } => cli::reverse::reverse(&dst_branch, &config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn test_parse_reverse() {
        let matches = command()
            .try_get_matches_from(["great-scott", "reverse", "--dst-branch", "main"])
            .unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();

        match cli.command {
            Some(Commands::Reverse { dst_branch }) => assert_eq!(dst_branch, "main"),
            _ => panic!("expected reverse command"),
        }
    }

    #[test]
    fn test_reverse_requires_destination() {
        let result = command().try_get_matches_from(["great-scott", "reverse"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let matches = command().try_get_matches_from(["great-scott"]).unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_short_version_flag() {
        let err = command()
            .try_get_matches_from(["great-scott", "-v"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
