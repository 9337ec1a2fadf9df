/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity, e.g.
/// `RUST_LOG=tab_lifecycle=debug` to see per-transition scheduling or
/// `RUST_LOG=info` for lifecycle milestones only.
///
/// Call once at process start, before any session is created.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
