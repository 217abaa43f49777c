// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the whole program.
//
// - Logs go to stderr, so `--json` output on stdout stays machine-readable
// - RUST_LOG overrides the defaults, e.g. RUST_LOG=page_harvester=trace
// - Without --verbose we log at info for this crate and warn for libraries
// =============================================================================

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging(verbose: bool) -> Result<()> {
    let own_level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,page_harvester={}", own_level)));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
