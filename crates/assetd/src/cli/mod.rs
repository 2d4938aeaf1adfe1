//! Command-line interface for assetd.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, SchemaCommand, ServeCommand};

use crate::logging::Verbosity;

/// assetd - Equipment asset intake service
///
/// Serves the asset form and stores submitted assets in a `SQLite` database.
#[derive(Debug, Parser)]
#[command(name = "assetd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeCommand),

    /// Provision or inspect the database schema
    #[command(subcommand)]
    Schema(SchemaCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Serve(ServeCommand { listen: None }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "assetd");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(2, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["assetd", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve(ServeCommand { listen: None })
        ));
    }

    #[test]
    fn test_parse_serve_with_listen() {
        let cli = Cli::try_parse_from(["assetd", "serve", "--listen", "127.0.0.1:8080"]).unwrap();
        match cli.command {
            Command::Serve(cmd) => assert_eq!(cmd.listen.as_deref(), Some("127.0.0.1:8080")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_schema_init() {
        let cli = Cli::try_parse_from(["assetd", "schema", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Schema(SchemaCommand::Init)));
    }

    #[test]
    fn test_parse_schema_status_json() {
        let cli = Cli::try_parse_from(["assetd", "schema", "status", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Schema(SchemaCommand::Status { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["assetd", "-c", "/etc/assetd.toml", "config", "show"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/assetd.toml")));
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: false })
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["assetd", "serve", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_config_validate_file() {
        let cli = Cli::try_parse_from(["assetd", "config", "validate", "/tmp/a.toml"]).unwrap();
        match cli.command {
            Command::Config(ConfigCommand::Validate { file }) => {
                assert_eq!(file, Some(PathBuf::from("/tmp/a.toml")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["assetd"]).is_err());
    }
}
