//! Diagnostic logging for mixfix
//!
//! Logs go to stderr so they never mix with the dry-run preview on stdout.
//! Only warnings are shown unless `--verbose` is passed.

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Filter directive for the requested verbosity
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose { "mixfix=debug" } else { "mixfix=warn" }
}

/// Initialize the logging system
///
/// A second call fails because the global subscriber is already set.
pub fn init_logging(verbose: bool) -> Result<()> {
    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
        )
        .with(EnvFilter::new(filter_directive(verbose)));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}
