//! Postgres pool shared by every listing query.

use async_trait::async_trait;
use billboard_config::DatabaseConfig;
use billboard_core::{BillboardError, BillboardResult, Interface};
use shaku::Component;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info, warn};

/// Injectable handle on the Postgres pool.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// The pool that sessions borrow connections from.
    fn inner(&self) -> &PgPool;

    /// Round-trips a trivial statement.
    async fn ping(&self) -> BillboardResult<()>;

    /// Applies the schema under `migrations/`.
    async fn run_migrations(&self) -> BillboardResult<()>;

    async fn close(&self);
}

/// Owns the pool for the lifetime of the DI module.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens a pool sized and timed by `config`.
    pub async fn new(config: &DatabaseConfig) -> BillboardResult<Self> {
        debug!(
            min = config.min_connections,
            max = config.max_connections,
            "Opening billboard store pool"
        );

        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!(error = %e, "Billboard store unreachable");
                BillboardError::Database(format!("cannot open pool: {e}"))
            })?;

        info!(size = pool.size(), "Billboard store pool ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &PgPool {
        &self.pool
    }

    async fn ping(&self) -> BillboardResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| BillboardError::Database(format!("ping failed: {e}")))
    }

    async fn run_migrations(&self) -> BillboardResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| BillboardError::Database(format!("schema migration failed: {e}")))?;
        info!("Billboard schema up to date");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Billboard store pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}
