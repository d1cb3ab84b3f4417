//! CLI argument definitions using clap derive

use crate::rates::CurrencyCode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// ratecache - cached currency conversion
///
/// Converts amounts between currencies, keeping recently used exchange
/// rates in a bounded LRU cache.
#[derive(Parser, Debug)]
#[command(name = "ratecache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RATECACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the number of cached currency pairs (4-128)
    #[arg(long, global = true)]
    pub capacity: Option<usize>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an amount between two currencies
    Convert(ConvertArgs),

    /// Convert many amounts, one request per input line
    Batch(BatchArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    /// Source currency (e.g. USD)
    pub from: CurrencyCode,

    /// Target currency (e.g. EUR)
    pub to: CurrencyCode,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the batch command
///
/// Each line is either `<AMOUNT> <FROM> <TO>` or `refresh <FROM> <TO>`.
/// Blank lines and lines starting with `#` are skipped.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Read requests from a file instead of stdin
    #[arg(short = 'i', long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for conversion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable line
    Table,
    /// JSON output
    Json,
    /// Converted amount only
    Plain,
}
