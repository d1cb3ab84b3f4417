//! Convert command - convert a single amount

use super::{blocking, build_cache};
use crate::cli::args::{ConvertArgs, OutputFormat};
use crate::config::Config;
use crate::error::RateResult;
use crate::rates::{Conversion, CurrencyPair};
use console::style;

/// Execute the convert command
pub async fn execute(args: ConvertArgs, config: &Config) -> RateResult<()> {
    let config = config.clone();
    let pair = CurrencyPair::new(args.from, args.to);
    let amount = args.amount;

    let conversion = blocking(move || build_cache(&config)?.convert(amount, &pair)).await?;

    print_conversion(&conversion, args.format)
}

/// Print one conversion in the requested format
pub(crate) fn print_conversion(conversion: &Conversion, format: OutputFormat) -> RateResult<()> {
    match format {
        OutputFormat::Table => println!(
            "{} {}",
            style(summary(conversion)).bold(),
            style(detail(conversion)).dim()
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string(conversion)?),
        OutputFormat::Plain => println!("{:.2}", conversion.converted),
    }
    Ok(())
}

fn summary(conversion: &Conversion) -> String {
    let pair = &conversion.quote.pair;
    format!(
        "{:.2} {} = {:.2} {}",
        conversion.amount, pair.base, conversion.converted, pair.quote
    )
}

fn detail(conversion: &Conversion) -> String {
    format!(
        "(rate {:.6} via {}, {})",
        conversion.quote.rate,
        conversion.quote.provider,
        conversion.quote.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
