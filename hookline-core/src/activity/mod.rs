//! Canonical activity records.
//!
//! An [`ActivityRecord`] is what every accepted webhook delivery becomes:
//! one immutable row describing a push, an opened pull request or a merge.

mod action;

pub use action::ActionKind;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::timestamp::format_instant;

/// Placeholder for identifiers and names missing from a payload.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Commit sha or pull request id the event originated from.
    pub request_id: String,
    pub author: String,
    pub action: ActionKind,
    /// Source branch; always empty for pushes.
    pub from_branch: String,
    pub to_branch: String,
    /// Event instant, truncated to the microsecond precision stores keep.
    pub timestamp: DateTime<Utc>,
    /// Pre-rendered sentence shown in the activity feed.
    pub message: String,
    /// `owner/name` of the repository, when the payload carried it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl ActivityRecord {
    /// Display form of [`timestamp`](Self::timestamp).
    pub fn formatted_timestamp(&self) -> String {
        format_instant(&self.timestamp)
    }
}

/// Fields shared by every action kind, collected before the action and its
/// timestamp are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub request_id: String,
    pub author: String,
    pub from_branch: String,
    pub to_branch: String,
    pub repository: Option<String>,
}

impl RecordDraft {
    /// Seal the draft into a record, rendering the message from the action's
    /// template. Sub-microsecond digits of `timestamp` are dropped.
    pub fn finish(
        self,
        action: ActionKind,
        timestamp: DateTime<Utc>,
        formatted_timestamp: &str,
    ) -> ActivityRecord {
        let message = action.render_message(
            &self.author,
            &self.from_branch,
            &self.to_branch,
            formatted_timestamp,
        );

        ActivityRecord {
            request_id: self.request_id,
            author: self.author,
            action,
            from_branch: self.from_branch,
            to_branch: self.to_branch,
            timestamp: timestamp.trunc_subsecs(6),
            message,
            repository: self.repository,
        }
    }
}

/// An activity record as returned by a store, with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredActivity {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: ActivityRecord,
    pub received_at: DateTime<Utc>,
}
