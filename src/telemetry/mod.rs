//! Logging setup
//!
//! Diagnostics go through `tracing` to stderr; user-facing output never does.
//! `RUST_LOG` wins over the verbosity flags when set.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Verbosity;

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "warn,sarcasm_detector=info",
        Verbosity::Verbose => "info,sarcasm_detector=debug",
        Verbosity::VeryVerbose => "debug,sarcasm_detector=trace",
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(false),
        )
        .try_init();
}
