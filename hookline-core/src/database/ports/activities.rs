use async_trait::async_trait;
use uuid::Uuid;

use crate::activity::{ActivityRecord, StoredActivity};
use crate::error::Result;

/// Append-only storage for activity records.
///
/// Records are never updated or deleted through this interface. Timestamps
/// are kept at microsecond precision, which
/// [`RecordDraft::finish`](crate::activity::RecordDraft::finish) already
/// applies, so a listed record equals the one inserted. Listings are
/// ordered by record timestamp, newest first, with ties broken by the newer
/// store id.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Persist a record and return the id the store assigned to it.
    async fn insert(&self, record: &ActivityRecord) -> Result<Uuid>;

    /// Newest-first listing; `None` returns every stored record.
    async fn list_recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<StoredActivity>>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<()>;
}
