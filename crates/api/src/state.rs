use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: boxd_db::DbPool,
    /// Server configuration, validated once at startup.
    pub config: Arc<ServerConfig>,
    /// Client for the external movie-metadata provider.
    pub catalog: CatalogClient,
}
