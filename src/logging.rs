use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `edit_hooks=debug`.
pub const LOG_ENV: &str = "EDIT_HOOKS_LOG";

/// Install a stderr fmt subscriber.
///
/// Off unless `EDIT_HOOKS_LOG` is set: the hook caller reads stderr, so
/// diagnostics must be opted into.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    // A subscriber may already be set when called from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
