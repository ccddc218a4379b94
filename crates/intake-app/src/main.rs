use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;

use intake::{run_lookup, run_repl_mode, Cli, Commands, IntakeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = IntakeConfig::from_cli(&cli);
    log::info!("Using diagnosis service at {}", config.base_url);

    match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "intake-cli", &mut io::stdout());
            Ok(())
        }
        Some(Commands::Lookup { ref id }) => {
            if !run_lookup(&config, id).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_repl_mode(&config).await,
    }
}
