use crate::traits::LoggingError;
use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `default_directive` (e.g. `"info"`, `"license_matcher=debug"`).
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_tracing(default_directive: &str) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}
