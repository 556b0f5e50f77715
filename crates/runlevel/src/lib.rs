//! # Runlevel
//!
//! A staged lifecycle orchestrator: describe each part of your application
//! as a *system* with an integer run level (RC) and optional `up` / `down`
//! actions, and the engine brings everything up in ascending RC order and
//! tears it down in descending RC order — concurrently within a level,
//! strictly serially across levels.
//!
//! ## The Model
//!
//! - **[`SystemSpec`]** — one system: an RC (default 0) plus optional
//!   bring-up and tear-down actions. Actions are plain async closures.
//! - **Level** — all actions sharing one RC value, launched together and
//!   joined before the next level starts.
//! - **[`State`]** — the accumulator threaded across levels. Every action
//!   receives a snapshot of the state the previous levels produced and may
//!   contribute a partial state of its own; contributions merge after the
//!   level settles, last-launched wins on a key collision.
//! - **[`Plan`]** — a prepared orientation ([`up`] or [`down`]) over a
//!   descriptor set, runnable any number of times.
//!
//! ## Quick Start
//!
//! ```rust
//! use runlevel::{keyed, up, State, SystemSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), runlevel::ActionError> {
//!     let systems = vec![
//!         // RC 0: produce the base counter from the caller arguments.
//!         SystemSpec::new().up(|base: u32, _state: State| async move {
//!             keyed("counter")(base)
//!         }),
//!         // RC 1: read what RC 0 contributed.
//!         SystemSpec::new().rc(1).up(|_base: u32, state: State| async move {
//!             let counter = state.get::<u32>("counter").copied().unwrap_or(0);
//!             keyed("total")(counter + 1)
//!         }),
//!     ];
//!
//!     let state = up(&systems).run(41).await?;
//!     assert_eq!(state.get::<u32>("total"), Some(&42));
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! Cooperative, single-task: a level's actions are all invoked before any is
//! awaited, then polled through one join barrier. Actions interleave at
//! their own await points — no OS threads, no locks, no preemption. The
//! barrier never cancels: when one action fails, its siblings still run to
//! completion before the failure propagates, so no concurrent work outlives
//! the reported error. No further level runs after a failed one.
//!
//! ## Error Handling
//!
//! The only failure kind is an action failure. The original error value is
//! carried through [`ActionError`] unchanged and can be recovered with
//! [`ActionError::downcast_ref`]. The engine neither retries nor rolls back;
//! on failure the run rejects with the first failure (launch order) and no
//! partial state is exposed.
//!
//! ## Observability
//!
//! The engine emits `tracing` events: `debug` for per-level scheduling,
//! `warn` when a level aborts a run. [`crate::tracing::setup_tracing`]
//! installs an env-filtered subscriber for binaries that want the default
//! rendering.

pub mod error;
mod executor;
pub mod plan;
pub mod state;
pub mod system;
pub mod tracing;

pub use error::{ActionError, BoxError};
pub use plan::{down, up, Plan};
pub use state::{keyed, State};
pub use system::{ActionFuture, IntoContribution, SystemSpec};
