//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Build the filter for `level`, falling back to `info` on an invalid
/// directive.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global `fmt` subscriber.
///
/// Returns `false` if a global subscriber was already installed, which is
/// the normal case when tests initialise tracing more than once.
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .try_init()
        .is_ok()
}

/// [`init_tracing`] driven by the `[logging]` config section.
pub fn init_from_config(config: &LoggingConfig) -> bool {
    init_tracing(&config.level)
}
