use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    activity::{ActivityRecord, StoredActivity},
    database::ports::activities::ActivityStore,
    error::{ActivityError, Result},
};

#[derive(Clone, Debug)]
pub struct PostgresActivityStore {
    pool: PgPool,
}

impl PostgresActivityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    request_id: String,
    author: String,
    action: String,
    from_branch: String,
    to_branch: String,
    repository: Option<String>,
    occurred_at: DateTime<Utc>,
    message: String,
    received_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for StoredActivity {
    type Error = ActivityError;

    fn try_from(row: ActivityRow) -> Result<Self> {
        Ok(StoredActivity {
            id: row.id,
            record: ActivityRecord {
                request_id: row.request_id,
                author: row.author,
                action: row.action.parse()?,
                from_branch: row.from_branch,
                to_branch: row.to_branch,
                timestamp: row.occurred_at,
                message: row.message,
                repository: row.repository,
            },
            received_at: row.received_at,
        })
    }
}

#[async_trait]
impl ActivityStore for PostgresActivityStore {
    async fn insert(&self, record: &ActivityRecord) -> Result<Uuid> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"
            INSERT INTO activities (
                id, request_id, author, action, from_branch, to_branch,
                repository, occurred_at, message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(&record.request_id)
        .bind(&record.author)
        .bind(record.action.as_str())
        .bind(&record.from_branch)
        .bind(&record.to_branch)
        .bind(record.repository.as_deref())
        .bind(record.timestamp)
        .bind(&record.message)
        .execute(self.pool())
        .await
        .map_err(|e| {
            ActivityError::Database(format!("Failed to insert activity: {}", e))
        })?;

        debug!(%id, action = %record.action, "activity inserted");
        Ok(id)
    }

    async fn list_recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<StoredActivity>> {
        // LIMIT NULL is LIMIT ALL
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT
                id, request_id, author, action, from_branch, to_branch,
                repository, occurred_at, message, received_at
            FROM activities
            ORDER BY occurred_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            ActivityError::Database(format!("Failed to list activities: {}", e))
        })?;

        rows.into_iter().map(StoredActivity::try_from).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| {
                ActivityError::Database(format!("Database ping failed: {}", e))
            })?;
        Ok(())
    }
}
