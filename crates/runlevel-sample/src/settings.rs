use serde::{Deserialize, Serialize};

/// Static configuration handed to every lifecycle action of the demo stack.
///
/// This is the caller-arguments type of the orchestration: each action
/// receives its own clone alongside the accumulated state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Connection string for the demo database pool.
    pub database_url: String,
    /// Capacity of the in-memory demo cache.
    pub cache_capacity: usize,
    /// Address the demo API listener binds to.
    pub listen_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/demo".to_string(),
            cache_capacity: 1024,
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}
