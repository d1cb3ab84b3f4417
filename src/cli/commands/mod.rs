//! CLI command implementations

pub mod batch;
pub mod completions;
pub mod config;
pub mod convert;

pub use batch::execute as batch;
pub use completions::execute as completions;
pub use config::execute as config;
pub use convert::execute as convert;

use crate::config::Config;
use crate::error::{RateError, RateResult};
use crate::rates::{create_provider, RateCache};

/// Build the quote cache described by the configuration
fn build_cache(config: &Config) -> RateResult<RateCache> {
    let provider = create_provider(config)?;
    RateCache::from_config(config, provider)
}

/// Run blocking provider work off the async runtime
async fn blocking<T, F>(work: F) -> RateResult<T>
where
    F: FnOnce() -> RateResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RateError::Internal(format!("rate worker failed: {}", e)))?
}
