//! # Demo Stack Runner
//!
//! Brings the demo service stack up, touches the running handles, and tears
//! everything down in reverse run-level order. Run with
//! `RUST_LOG=info cargo run -p runlevel-sample` to watch the lifecycle.

use runlevel::tracing::setup_tracing;
use runlevel::{down, up, ActionError};
use runlevel_sample::services::{demo_stack, ApiServer, CacheHandle, DbPool};
use runlevel_sample::settings::Settings;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ActionError> {
    setup_tracing();

    let settings = Settings::default();
    let systems = demo_stack();

    info!("bringing demo stack up");
    let state = up(&systems).run(settings.clone()).await?;

    if let (Some(pool), Some(cache), Some(api)) = (
        state.get::<DbPool>("db"),
        state.get::<CacheHandle>("cache"),
        state.get::<ApiServer>("api"),
    ) {
        info!(
            addr = %api.addr,
            db = %pool.url,
            connections = pool.connections,
            cache_capacity = cache.capacity,
            "demo stack serving"
        );
    }

    info!("tearing demo stack down");
    down(&systems).run_seeded(settings, state).await?;

    info!("demo stack stopped");
    Ok(())
}
