//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gestured - Turn libinput touchpad gestures into user-configured commands
#[derive(Parser, Debug)]
#[command(name = "gestured")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read libinput debug-events lines from stdin and dispatch commands
    Run {
        /// Log resolved actions instead of executing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Load and validate the configuration, then exit
    CheckConfig,

    /// Parse event lines from stdin and print structured samples as JSON
    Parse,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_run_command_with_defaults() {
        let args = vec!["gestured", "run"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Run { dry_run } => {
                assert!(!dry_run);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_dry_run() {
        let args = vec!["gestured", "run", "--dry-run"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Run { dry_run } => {
                assert!(dry_run);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_check_config_command() {
        let args = vec!["gestured", "check-config"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::CheckConfig));
    }

    #[test]
    fn test_cli_parse_parse_command() {
        let args = vec!["gestured", "parse"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Parse));
    }

    #[test]
    fn test_cli_global_verbose_flag() {
        let args = vec!["gestured", "--verbose", "run"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_verbose_shorthand() {
        let args = vec!["gestured", "-v", "run"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let args = vec!["gestured", "--config", "/path/to/config.toml", "run"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_cli_config_shorthand() {
        let args = vec!["gestured", "-c", "/custom/config.toml", "check-config"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_invalid_command_fails() {
        let args = vec!["gestured", "invalid-command"];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_missing_subcommand_fails() {
        let args = vec!["gestured"];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"run"));
        assert!(subcommands.contains(&"check-config"));
        assert!(subcommands.contains(&"parse"));
    }
}
