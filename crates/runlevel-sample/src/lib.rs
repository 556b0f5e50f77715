//! # Runlevel Sample App
//!
//! A small service stack (database pool, cache, API listener) brought up
//! and torn down by the `runlevel` engine. Exposed as a library so the
//! integration tests can drive the same stack the binary runs.

pub mod services;
pub mod settings;
