//! finbuddy CLI: chat, ask, build-index, emi, rates. Config from env (`config/config.env`, `.env`).

use std::io;

use anyhow::Result;
use clap::Parser;
use finbuddy_cli::assembly::build_orchestrator;
use finbuddy_cli::runner::{emi_line, rates_table, run_ask, run_build_index, run_chat};
use finbuddy_cli::{AppConfig, BaseConfig, Cli, Commands};
use finbuddy_core::init_tracing;
use session::SessionManager;
use tokio::io::BufReader;

/// Loads the app config (API key required) and fails fast on invalid values.
fn load_app_config() -> Result<AppConfig> {
    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename("config/config.env").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let base = BaseConfig::load()?;
    init_tracing(&base.log_file)?;

    let mut stdout = io::stdout();
    match cli.command {
        Commands::Chat => {
            let config = load_app_config()?;
            let orchestrator = build_orchestrator(&config).await?;
            let manager = SessionManager::new();
            let input = BufReader::new(tokio::io::stdin());
            run_chat(&orchestrator, &manager, input, &mut stdout).await
        }
        Commands::Ask { query } => {
            let config = load_app_config()?;
            let orchestrator = build_orchestrator(&config).await?;
            run_ask(&orchestrator, &query.join(" "), &mut stdout).await
        }
        Commands::BuildIndex { force } => {
            let config = load_app_config()?;
            run_build_index(&config, force, &mut stdout).await
        }
        Commands::Emi {
            principal,
            rate,
            years,
        } => {
            println!("{}", emi_line(principal, rate, years)?);
            Ok(())
        }
        Commands::Rates => {
            print!("{}", rates_table());
            Ok(())
        }
    }
}
