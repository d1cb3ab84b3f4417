//! ratecache - cached currency conversion
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use ratecache::cli::{commands, Cli, Commands};
use ratecache::config::{ConfigManager, LogFormat};
use ratecache::error::RateResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, log_format: LogFormat) {
    let filter = match verbose {
        0 => EnvFilter::new("ratecache=warn"),
        1 => EnvFilter::new("ratecache=info"),
        _ => EnvFilter::new("ratecache=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.without_time().init(),
    }
}

async fn run() -> RateResult<()> {
    let cli = Cli::parse();

    // Completions don't need config loading
    if let Commands::Completions(ref args) = cli.command {
        commands::completions(args);
        return Ok(());
    }

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    // The log format lives in the config, so the load outcome is logged
    // once the subscriber exists
    let loaded = manager.load().await?;
    init_logging(cli.verbose, loaded.config.general.log_format);
    debug!("{}", loaded.source);

    let mut config = loaded.config;

    if let Some(capacity) = cli.capacity {
        debug!("Cache capacity overridden to {}", capacity);
        config.cache.capacity = capacity;
    }

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Convert(args) => commands::convert(args, &config).await,
        Commands::Batch(args) => commands::batch(args, &config).await,
        Commands::Config(args) => commands::config(args, &config, &manager).await,
    }
}
