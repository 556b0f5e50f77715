//! # Demo Services
//!
//! The demo stack is expressed twice over: each service implements the
//! [`Service`] trait (start/stop hooks around a named resource), and
//! [`service_spec`] adapts any such service into a [`SystemSpec`] at a given
//! run level, wiring `start` to the `up` orientation and `stop` to `down`.
//!
//! Stack layout:
//!
//! | service    | rc | contributes |
//! |------------|----|-------------|
//! | `Database` | 0  | `db`        |
//! | `Cache`    | 0  | `cache`     |
//! | `HttpApi`  | 1  | `api`       |
//!
//! `Database` and `Cache` share run level 0 and start concurrently;
//! `HttpApi` starts once both handles are in the accumulator, and stops
//! first on tear-down.

use crate::settings::Settings;
use async_trait::async_trait;
use runlevel::{keyed, BoxError, State, SystemSpec};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Failures the demo services can raise while starting or stopping.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("database unreachable: {0}")]
    DatabaseUnreachable(String),
    #[error("missing dependency in state: {0}")]
    MissingDependency(&'static str),
}

/// A service with explicit start/stop lifecycle hooks.
///
/// `start` returns the partial state the service contributes (typically one
/// named handle built with [`keyed`]); `stop` receives the accumulated state
/// of the bring-up so it can find its own handle again.
#[async_trait]
pub trait Service: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn start(&self, settings: &Settings, state: &State) -> Result<State, BoxError>;

    async fn stop(&self, settings: &Settings, state: &State) -> Result<(), BoxError>;
}

/// Adapts a [`Service`] into a system descriptor at run level `rc`.
pub fn service_spec<S: Service>(rc: i64, service: S) -> SystemSpec<Settings> {
    info!(service = service.name(), rc, "registering service");

    let service = Arc::new(service);
    let starter = Arc::clone(&service);
    let stopper = service;

    SystemSpec::new()
        .rc(rc)
        .up(move |settings: Settings, state: State| {
            let service = Arc::clone(&starter);
            async move { service.start(&settings, &state).await }
        })
        .down(move |settings: Settings, state: State| {
            let service = Arc::clone(&stopper);
            async move { service.stop(&settings, &state).await }
        })
}

// --- Handles placed into the accumulator ---

/// Connection pool handle contributed by [`Database`].
#[derive(Debug, Clone)]
pub struct DbPool {
    pub url: String,
    pub connections: u32,
}

/// Cache handle contributed by [`Cache`].
#[derive(Debug, Clone)]
pub struct CacheHandle {
    pub capacity: usize,
}

/// Listener handle contributed by [`HttpApi`].
#[derive(Debug, Clone)]
pub struct ApiServer {
    pub addr: String,
}

// --- Services ---

/// Run level 0: the demo database pool.
pub struct Database;

#[async_trait]
impl Service for Database {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn start(&self, settings: &Settings, _state: &State) -> Result<State, BoxError> {
        if settings.database_url.is_empty() {
            return Err(ServiceError::DatabaseUnreachable(settings.database_url.clone()).into());
        }

        info!(url = %settings.database_url, "connecting database pool");
        sleep(Duration::from_millis(10)).await;

        Ok(keyed("db")(DbPool {
            url: settings.database_url.clone(),
            connections: 8,
        }))
    }

    async fn stop(&self, _settings: &Settings, state: &State) -> Result<(), BoxError> {
        if let Some(pool) = state.get::<DbPool>("db") {
            info!(url = %pool.url, "draining database pool");
        }
        Ok(())
    }
}

/// Run level 0: the demo in-memory cache.
pub struct Cache;

#[async_trait]
impl Service for Cache {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn start(&self, settings: &Settings, _state: &State) -> Result<State, BoxError> {
        info!(capacity = settings.cache_capacity, "warming cache");
        Ok(keyed("cache")(CacheHandle {
            capacity: settings.cache_capacity,
        }))
    }

    async fn stop(&self, _settings: &Settings, _state: &State) -> Result<(), BoxError> {
        info!("flushing cache");
        Ok(())
    }
}

/// Run level 1: the demo API listener. Requires `db` and `cache`.
pub struct HttpApi;

#[async_trait]
impl Service for HttpApi {
    fn name(&self) -> &'static str {
        "http-api"
    }

    async fn start(&self, settings: &Settings, state: &State) -> Result<State, BoxError> {
        let pool = state
            .get::<DbPool>("db")
            .ok_or(ServiceError::MissingDependency("db"))?;
        let cache = state
            .get::<CacheHandle>("cache")
            .ok_or(ServiceError::MissingDependency("cache"))?;

        info!(
            addr = %settings.listen_addr,
            db = %pool.url,
            cache_capacity = cache.capacity,
            "starting api listener"
        );
        sleep(Duration::from_millis(5)).await;

        Ok(keyed("api")(ApiServer {
            addr: settings.listen_addr.clone(),
        }))
    }

    async fn stop(&self, _settings: &Settings, state: &State) -> Result<(), BoxError> {
        if let Some(api) = state.get::<ApiServer>("api") {
            info!(addr = %api.addr, "closing api listener");
        }
        Ok(())
    }
}

/// The full demo stack in definition order.
pub fn demo_stack() -> Vec<SystemSpec<Settings>> {
    vec![
        service_spec(0, Database),
        service_spec(0, Cache),
        service_spec(1, HttpApi),
    ]
}
