//! # Tracing Setup
//!
//! One-call bootstrap for structured logging in binaries and examples that
//! embed the engine. The engine itself only emits `tracing` events; whether
//! and how they are rendered is up to the host application.

/// Initializes the global tracing subscriber.
///
/// Filtering is environment-based: set `RUST_LOG` to control verbosity,
/// e.g. `RUST_LOG=runlevel=debug` to watch per-level scheduling events.
///
/// Call once, early in `main`; a second call panics because the global
/// subscriber is already set.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
