//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> eyre::Result<()> {
    init_logging()?;
    strainwise_cli::run().wrap_err("strainwise failed")
}

/// Send `log` records to stderr, filtered by `RUST_LOG`.
fn init_logging() -> eyre::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| eyre::eyre!("failed to install log subscriber: {err}"))
}
