//! Telemetry helpers for structured logging and tracing.

/// Install a default `RUST_LOG`-driven fmt subscriber unless one is already set.
///
/// Pool runs log under the `pool_run` span; admissions and retries at `debug`,
/// terminal task failures at `warn`, hook panics at `error`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
