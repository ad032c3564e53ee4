use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `MAPTO_LOG=mapto_core=debug`
const LOG_ENV: &str = "MAPTO_LOG";

/// Installs a stderr subscriber filtered by `MAPTO_LOG`, `warn` when unset.
///
/// Calling it again is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
