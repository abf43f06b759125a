use std::sync::Arc;

use anyhow::{Context, Result};
use hookline_config::Config;
use hookline_core::database::{
    ActivityDatabase, ActivityStore, InMemoryActivityStore,
};
use tracing::{info, warn};

/// Build the activity store the server will use for its whole lifetime.
///
/// With a database URL this connects to PostgreSQL and applies pending
/// migrations; without one (dev mode only) activities live in memory.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ActivityStore>> {
    let Some(url) = config.database.url.as_deref() else {
        warn!("No database configured - activities will not survive a restart");
        return Ok(Arc::new(InMemoryActivityStore::new()));
    };

    let database =
        connect_database(url, config.database.max_connections).await?;
    database
        .initialize_schema()
        .await
        .context("database migration failed")?;

    Ok(Arc::new(database.activities()))
}

pub async fn connect_database(
    url: &str,
    max_connections: u32,
) -> Result<ActivityDatabase> {
    let database = ActivityDatabase::connect(url, max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    info!("Successfully connected to PostgreSQL");
    Ok(database)
}
