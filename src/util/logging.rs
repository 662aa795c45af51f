//! Tracing setup. Logs go to stderr; stdout carries only the credential.

use crate::constants;
use tracing_subscriber::EnvFilter;

/// Filter from `GIT_PASSWORD_LOG`, falling back to warnings only.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(constants::LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .with_target(false)
        .try_init();
}
