use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    activity::{ActivityRecord, StoredActivity},
    database::ports::activities::ActivityStore,
    error::Result,
};

/// Process-local activity store, used in tests and for running the server
/// without PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryActivityStore {
    entries: RwLock<Vec<StoredActivity>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn insert(&self, record: &ActivityRecord) -> Result<Uuid> {
        let id = Uuid::now_v7();
        self.entries.write().push(StoredActivity {
            id,
            record: record.clone(),
            received_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<StoredActivity>> {
        let mut listed = self.entries.read().clone();
        listed.sort_by(|a, b| {
            b.record
                .timestamp
                .cmp(&a.record.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });

        if let Some(limit) = limit {
            listed.truncate(limit);
        }

        Ok(listed)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
