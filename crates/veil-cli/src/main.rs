mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use veil_config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so masked output on stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(path = %config_path.display(), "loaded config");

    match cli.command {
        cli::Commands::Scan { input, filter, json } => {
            return commands::scan::handle(input, filter, json, &config).await;
        }
        cli::Commands::Mask {
            input,
            filter,
            json,
        } => commands::mask::handle(input, filter, json, &config).await?,
        cli::Commands::Session { host, filter, copy } => {
            commands::session::handle(host, filter, copy, &config).await?
        }
        cli::Commands::Categories => commands::categories::handle(&config).await?,
        cli::Commands::Config { path } => {
            commands::config::handle(path, &config, &config_path).await?
        }
        cli::Commands::Completions { shell } => commands::completions::handle(shell)?,
    }

    Ok(ExitCode::SUCCESS)
}
