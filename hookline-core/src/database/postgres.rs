use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use std::{fmt, str::FromStr, time::Duration};
use tracing::info;

use crate::{
    database::infrastructure::postgres::repositories::{
        activities::PostgresActivityStore,
    },
    error::{ActivityError, Result},
};

/// Connection pool for the PostgreSQL activity store.
#[derive(Clone)]
pub struct ActivityDatabase {
    pool: PgPool,
    max_connections: u32,
}

impl fmt::Debug for ActivityDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl ActivityDatabase {
    pub async fn connect(
        connection_string: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let connect_options = PgConnectOptions::from_str(connection_string)
            .map_err(|e| {
                ActivityError::Database(format!(
                    "Invalid database connection string: {}",
                    e
                ))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                ActivityError::Database(format!(
                    "Database connection failed: {}",
                    e
                ))
            })?;

        info!(max_connections, "Database pool initialized");

        Ok(Self {
            pool,
            max_connections,
        })
    }

    /// Wrap an existing pool, e.g. one handed out by `#[sqlx::test]`.
    pub fn from_pool(pool: PgPool) -> Self {
        let max_connections = pool.options().get_max_connections();
        Self {
            pool,
            max_connections,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn activities(&self) -> PostgresActivityStore {
        PostgresActivityStore::new(self.pool.clone())
    }

    /// Apply pending migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR.run(&self.pool).await.map_err(|e| {
            ActivityError::Database(format!("Migration failed: {}", e))
        })?;

        info!("Database schema is up to date");
        Ok(())
    }
}
