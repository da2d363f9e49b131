use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Filtering comes from `RUST_LOG`. Output goes to stderr; stdout is reserved for the
/// one-line result Tautulli shows in its notification log.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()) // uses RUST_LOG
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
