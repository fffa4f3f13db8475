//! PayFlow web main entry point

use anyhow::Context;
use clap::Parser;
use payflow_api::{start_server, AppState};
use payflow_config::{Config, ConfigError};
use payflow_core::{build_http_client, AccountClient, TransactionClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "payflow-web")]
#[command(version = "0.1.0")]
#[command(about = "Web frontend for the PayFlow account and transaction services", long_about = None)]
struct Args {
    /// Configuration file path (defaults to ./config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

/// An explicitly given file must load; the implicit one is optional
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    match Config::load(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound { .. }) if !required => Ok(Config::default()),
        Err(e) if !required => {
            eprintln!("[WARN] Ignoring {}: {}", path.display(), e);
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details())),
    }
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    config.apply_process_env();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .context("Invalid configuration")?;

    init_logging(&config);
    match &args.config {
        Some(path) => log::info!("Config loaded from {}", path.display()),
        None => log::info!("Config loaded (default location or built-in defaults)"),
    }

    let routes = config.routes();
    if routes.is_relative() {
        log::info!("Relative routing: backend paths resolve against {}", config.api.origin);
    }

    let http = build_http_client().context("Failed to build HTTP client")?;
    let accounts = AccountClient::new(http.clone(), &routes, &config.api.origin);
    let transactions = TransactionClient::new(http, &routes, &config.api.origin);
    let state = AppState::new(config, routes, Arc::new(accounts), Arc::new(transactions));

    let rt = Runtime::new()?;
    rt.block_on(start_server(state))
}
