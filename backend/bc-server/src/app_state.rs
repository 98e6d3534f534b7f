use bc_dispatch::BroadcastEngine;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Process-wide state shared by every handler; built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BroadcastEngine>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(engine: BroadcastEngine, pool: SqlitePool) -> Self {
        Self {
            engine: Arc::new(engine),
            pool,
        }
    }
}
