use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::gateway::{AdminMigrator, PersistenceGateway, PgGateway};

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn PersistenceGateway>,
    pub migrator: Arc<dyn AdminMigrator>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        gateway: Arc<dyn PersistenceGateway>,
        migrator: Arc<dyn AdminMigrator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            migrator,
        }
    }

    /// State backed by one Postgres pool for both gateways
    pub fn from_pool(config: AppConfig, pool: PgPool) -> Self {
        let pg = Arc::new(PgGateway::new(pool));
        Self::new(config, pg.clone(), pg)
    }
}
