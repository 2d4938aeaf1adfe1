//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Listen address, overriding `server.host` and `server.port`
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,
}

/// Database schema commands.
#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Create the database and its tables if missing
    Init,

    /// Show the schema version and row count
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the default configuration file path
    Path,

    /// Validate a configuration file
    Validate {
        /// Path to configuration file (defaults to standard location)
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command_debug() {
        let cmd = ServeCommand {
            listen: Some("127.0.0.1:5000".to_string()),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("127.0.0.1:5000"));
    }

    #[test]
    fn test_schema_command_variants() {
        assert!(matches!(SchemaCommand::Init, SchemaCommand::Init));
        let status = SchemaCommand::Status { json: true };
        assert!(format!("{status:?}").contains("json: true"));
    }

    #[test]
    fn test_config_validate_debug() {
        let cmd = ConfigCommand::Validate {
            file: Some(PathBuf::from("/etc/assetd.toml")),
        };
        assert!(format!("{cmd:?}").contains("assetd.toml"));
    }
}
