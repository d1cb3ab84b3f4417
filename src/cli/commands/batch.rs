//! Batch command - convert many amounts through one shared cache

use super::convert::print_conversion;
use super::{blocking, build_cache};
use crate::cli::args::{BatchArgs, OutputFormat};
use crate::config::Config;
use crate::error::{RateError, RateResult};
use crate::rates::{CacheStats, CurrencyCode, CurrencyPair, RateCache};
use console::style;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

const USAGE: &str = "expected \"<AMOUNT> <FROM> <TO>\" or \"refresh <FROM> <TO>\"";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
enum Request {
    Convert { amount: f64, pair: CurrencyPair },
    Refresh(CurrencyPair),
}

/// Outcome of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BatchSummary {
    total: usize,
    failed: usize,
}

/// Execute the batch command
pub async fn execute(args: BatchArgs, config: &Config) -> RateResult<()> {
    let input = read_input(args.file.as_deref()).await?;
    let config = config.clone();
    let format = args.format;

    blocking(move || {
        let mut cache = build_cache(&config)?;
        let summary = run_requests(&mut cache, &input, format);
        let stats = cache.stats();

        info!(
            "Batch finished: {} requests, {} hits, {} misses, {} refreshes",
            summary.total, stats.hits, stats.misses, stats.refreshes
        );
        if format == OutputFormat::Table {
            print_stats(&stats);
        }

        if summary.failed > 0 {
            return Err(RateError::BatchFailed {
                failed: summary.failed,
                total: summary.total,
            });
        }
        Ok(())
    })
    .await
}

async fn read_input(file: Option<&Path>) -> RateResult<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .await
            .map_err(|e| RateError::io(format!("reading batch file {}", path.display()), e)),
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .map_err(|e| RateError::io("reading batch requests from stdin", e))?;
            Ok(input)
        }
    }
}

/// Apply every request in `input`, reporting failures and carrying on
fn run_requests(cache: &mut RateCache, input: &str, format: OutputFormat) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let result = match parse_line(number, line) {
            Ok(None) => continue,
            Ok(Some(request)) => apply(cache, request, format).map_err(|e| RateError::BatchLine {
                line: number,
                reason: e.to_string(),
            }),
            Err(e) => Err(e),
        };

        summary.total += 1;
        if let Err(e) = result {
            debug!("Request on line {} failed", number);
            eprintln!("{} {}", style("Error:").red().bold(), e);
            summary.failed += 1;
        }
    }

    summary
}

fn apply(cache: &mut RateCache, request: Request, format: OutputFormat) -> RateResult<()> {
    match request {
        Request::Convert { amount, pair } => {
            let conversion = cache.convert(amount, &pair)?;
            print_conversion(&conversion, format)
        }
        Request::Refresh(pair) => {
            cache.refresh(&pair)?;
            if format == OutputFormat::Table {
                println!("{}", style(format!("refreshed {}", pair)).dim());
            }
            Ok(())
        }
    }
}

/// Parse one line; blank lines and `#` comments yield `None`
fn parse_line(number: usize, line: &str) -> RateResult<Option<Request>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let invalid = |reason: String| RateError::BatchLine {
        line: number,
        reason,
    };
    let fields: Vec<&str> = line.split_whitespace().collect();

    let request = match fields.as_slice() {
        [verb, from, to] if verb.eq_ignore_ascii_case("refresh") => {
            Request::Refresh(pair(from, to).map_err(|e| invalid(e.to_string()))?)
        }
        [amount, from, to] => Request::Convert {
            amount: parse_amount(amount).map_err(|e| invalid(e.to_string()))?,
            pair: pair(from, to).map_err(|e| invalid(e.to_string()))?,
        },
        _ => return Err(invalid(USAGE.to_string())),
    };

    Ok(Some(request))
}

fn pair(from: &str, to: &str) -> RateResult<CurrencyPair> {
    Ok(CurrencyPair::new(
        CurrencyCode::parse(from)?,
        CurrencyCode::parse(to)?,
    ))
}

fn parse_amount(raw: &str) -> RateResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| RateError::InvalidAmount(raw.to_string()))
}

fn print_stats(stats: &CacheStats) {
    println!();
    println!(
        "{} {}/{} pairs cached, {} hits, {} misses, {} refreshes",
        style("Cache:").bold(),
        stats.len,
        stats.capacity,
        stats.hits,
        stats.misses,
        stats.refreshes
    );
}
