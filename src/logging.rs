use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;

/// How chatty the command line asked us to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Pick the filter directive for the configured level and CLI verbosity.
/// `RUST_LOG` still takes precedence in `init`.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbosity: Verbosity) -> String {
    let level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => config.level.as_str(),
        Verbosity::Verbose => "debug",
    };
    // HTTP crates never log more than warn, nor more than the crate itself
    let http_level = match level {
        "error" | "off" => level,
        _ => "warn",
    };
    format!("{level},hyper={http_level},reqwest={http_level}")
}

/// Install the global subscriber. Logs go to stderr; stdout is kept for summaries.
pub fn init(config: &LoggingConfig, verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbosity)));

    let registry = tracing_subscriber::registry().with(filter);

    // try_init so a second call (tests) is a no-op instead of a panic
    if config.format == "json" {
        let _ = registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init();
    } else {
        let _ = registry
            .with(fmt::layer().with_target(false).compact().with_writer(io::stderr))
            .try_init();
    }
}
