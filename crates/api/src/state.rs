use std::sync::Arc;

use crate::config::ServerConfig;

/// What every handler can reach through `State<AppState>`: the connection
/// pool and the startup configuration. Cloned per request, so both members
/// are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: barkpark_db::DbPool,
    pub config: Arc<ServerConfig>,
}
