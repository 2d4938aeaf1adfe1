//! `assetd` - CLI and server entry point.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use assetd::cli::{Cli, Command, ConfigCommand, SchemaCommand, ServeCommand};
use assetd::{api, init_logging, AppState, Config, ConnectionSettings, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // `config` commands load (or refuse to load) on their own terms.
    match cli.command {
        Command::Serve(serve_cmd) => {
            let config = Config::load_from(cli.config)?;
            handle_serve(&config, &serve_cmd).await
        }
        Command::Schema(schema_cmd) => {
            let config = Config::load_from(cli.config)?;
            handle_schema(&config, &schema_cmd)
        }
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

async fn handle_serve(config: &Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let addr: SocketAddr = match &cmd.listen {
        Some(listen) => listen
            .parse()
            .with_context(|| format!("invalid --listen address '{listen}'"))?,
        None => config.listen_addr()?,
    };

    api::serve(AppState::from_config(config), addr).await?;
    Ok(())
}

fn handle_schema(config: &Config, cmd: &SchemaCommand) -> anyhow::Result<()> {
    let path = config.database_path();
    match cmd {
        SchemaCommand::Init => {
            let storage = Storage::provision(&path)?;
            info!(
                "Schema version {} ready at {}",
                storage.schema_version()?,
                storage.path().display()
            );
            println!("Database ready: {}", storage.path().display());
        }
        SchemaCommand::Status { json } => {
            let storage = Storage::connect(&ConnectionSettings::new(&path))
                .with_context(|| format!("cannot open {}; run `assetd schema init`", path.display()))?;
            let version = storage.schema_version()?;
            let assets = storage.count()?;
            if *json {
                let status = serde_json::json!({
                    "database_path": storage.path(),
                    "schema_version": version,
                    "assets": assets,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("assetd schema");
                println!("-------------");
                println!("Database:       {}", storage.path().display());
                println!("Schema version: {version}");
                println!("Assets:         {assets}");
            }
        }
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:           {}", config.server.host);
                println!("  Port:           {}", config.server.port);
                println!();
                println!("[Database]");
                println!("  Path:           {}", config.database_path().display());
                println!();
                println!("[Messages]");
                println!("  Locale:         {}", config.locale());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_file(&path)
                .with_context(|| format!("configuration error in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
