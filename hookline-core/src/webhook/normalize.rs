//! Push and pull-request normalizers.
//!
//! Both functions are total: a payload that cannot be modelled is logged and
//! reported as `None`, never as a panic or an error the sender would have to
//! retry.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::payload::{PullRequestEvent, PushEvent};
use crate::{
    activity::{ActionKind, ActivityRecord, RecordDraft, UNKNOWN},
    timestamp::{format_instant, parse_timestamp},
};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Normalize a `push` payload.
pub fn normalize_push(payload: &Value) -> Option<ActivityRecord> {
    normalize_push_at(payload, Utc::now())
}

/// Normalize a `pull_request` payload. Only opened and merged pull requests
/// produce a record.
pub fn normalize_pull_request(payload: &Value) -> Option<ActivityRecord> {
    normalize_pull_request_at(payload, Utc::now())
}

/// `now` stands in for payloads that carry no timestamp.
pub(crate) fn normalize_push_at(
    payload: &Value,
    now: DateTime<Utc>,
) -> Option<ActivityRecord> {
    let event: PushEvent = decode(payload, "push")?;

    let head_commit = event.head_commit.unwrap_or_default();
    let draft = RecordDraft {
        request_id: head_commit.id.unwrap_or_else(unknown),
        author: event
            .pusher
            .and_then(|pusher| pusher.name)
            .unwrap_or_else(unknown),
        from_branch: String::new(),
        to_branch: event
            .git_ref
            .as_deref()
            .map(branch_from_ref)
            .unwrap_or_default()
            .to_string(),
        repository: event.repository.and_then(|repo| repo.full_name),
    };

    let (timestamp, formatted) =
        resolve_timestamp(head_commit.timestamp.as_deref(), now, "push")?;

    Some(draft.finish(ActionKind::Push, timestamp, &formatted))
}

pub(crate) fn normalize_pull_request_at(
    payload: &Value,
    now: DateTime<Utc>,
) -> Option<ActivityRecord> {
    let event: PullRequestEvent = decode(payload, "pull_request")?;
    let pull_request = event.pull_request.unwrap_or_default();
    let lifecycle = event.action.as_deref().unwrap_or(UNKNOWN);

    let (action, raw_timestamp) = match lifecycle {
        "opened" => (ActionKind::PullRequest, present(pull_request.created_at)),
        "closed" if pull_request.merged.unwrap_or(false) => (
            ActionKind::Merge,
            present(pull_request.merged_at)
                .or_else(|| present(pull_request.created_at)),
        ),
        other => {
            debug!(
                lifecycle = other,
                merged = pull_request.merged.unwrap_or(false),
                "pull request lifecycle does not produce an activity"
            );
            return None;
        }
    };

    let draft = RecordDraft {
        request_id: pull_request
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(unknown),
        author: pull_request
            .user
            .and_then(|user| user.login)
            .unwrap_or_else(unknown),
        from_branch: pull_request
            .head
            .and_then(|head| head.name)
            .unwrap_or_else(unknown),
        to_branch: pull_request
            .base
            .and_then(|base| base.name)
            .unwrap_or_else(unknown),
        repository: event.repository.and_then(|repo| repo.full_name),
    };

    let (timestamp, formatted) =
        resolve_timestamp(raw_timestamp.as_deref(), now, "pull_request")?;

    Some(draft.finish(action, timestamp, &formatted))
}

/// Strip `refs/heads/` from a branch ref; tags and other refs pass through.
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(git_ref)
}

fn decode<T: DeserializeOwned>(
    payload: &Value,
    event_kind: &str,
) -> Option<T> {
    if !payload.is_object() {
        warn!(event_kind, "webhook payload is not a JSON object");
        return None;
    }

    match T::deserialize(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(
                event_kind,
                error = %err,
                "webhook payload does not match the expected shape"
            );
            None
        }
    }
}

/// Resolve the record instant and its display form.
///
/// A missing timestamp falls back to `now`; one that is present but does not
/// parse makes the payload unusable.
fn resolve_timestamp(
    raw: Option<&str>,
    now: DateTime<Utc>,
    event_kind: &str,
) -> Option<(DateTime<Utc>, String)> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Some((now, format_instant(&now)));
    };

    match parse_timestamp(raw) {
        Some(instant) => Some((instant, format_instant(&instant))),
        None => {
            warn!(event_kind, timestamp = raw, "unparseable event timestamp");
            None
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.trim().is_empty())
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    fn pull_request_payload(action: &str, merged: bool) -> Value {
        let merged_at = if merged {
            json!("2024-04-03T17:20:00Z")
        } else {
            Value::Null
        };

        json!({
            "action": action,
            "pull_request": {
                "id": 2_001_u64,
                "user": { "login": "bob" },
                "head": { "ref": "feature/login" },
                "base": { "ref": "main" },
                "created_at": "2024-04-01T09:00:00Z",
                "merged_at": merged_at,
                "merged": merged
            },
            "repository": { "full_name": "acme/widgets" }
        })
    }

    #[test]
    fn push_example_record() {
        let payload = json!({
            "pusher": { "name": "alice" },
            "head_commit": {
                "id": "abc123",
                "timestamp": "2024-03-21T10:30:00Z"
            },
            "ref": "refs/heads/main"
        });

        let record = normalize_push_at(&payload, fixed_now()).unwrap();
        assert_eq!(record.author, "alice");
        assert_eq!(record.request_id, "abc123");
        assert_eq!(record.action, ActionKind::Push);
        assert_eq!(record.to_branch, "main");
        assert_eq!(record.from_branch, "");
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 21, 10, 30, 0).unwrap()
        );
        assert_eq!(
            record.message,
            r#""alice" pushed to "main" on 21st March 2024 - 10:30 AM UTC"#
        );
        assert!(record.repository.is_none());
    }

    #[test]
    fn push_strips_only_the_heads_prefix() {
        for (git_ref, branch) in [
            ("refs/heads/feature/nested", "feature/nested"),
            ("refs/tags/v1.0.0", "refs/tags/v1.0.0"),
            ("main", "main"),
            ("", ""),
        ] {
            let payload = json!({ "ref": git_ref });
            let record = normalize_push_at(&payload, fixed_now()).unwrap();
            assert_eq!(record.to_branch, branch, "ref {git_ref}");
            assert_eq!(record.from_branch, "");
        }
    }

    #[test]
    fn push_defaults_missing_fields() {
        let record = normalize_push_at(&json!({}), fixed_now()).unwrap();

        assert_eq!(record.author, UNKNOWN);
        assert_eq!(record.request_id, UNKNOWN);
        assert_eq!(record.to_branch, "");
        assert_eq!(record.timestamp, fixed_now());
        assert_eq!(
            record.message,
            r#""Unknown" pushed to "" on 2nd January 2025 - 03:04 AM UTC"#
        );
    }

    #[test]
    fn push_with_null_head_commit_still_records() {
        let payload = json!({
            "ref": "refs/heads/stale",
            "pusher": { "name": "carol" },
            "head_commit": null,
            "repository": { "full_name": "acme/widgets" }
        });

        let record = normalize_push_at(&payload, fixed_now()).unwrap();
        assert_eq!(record.request_id, UNKNOWN);
        assert_eq!(record.timestamp, fixed_now());
        assert_eq!(record.repository.as_deref(), Some("acme/widgets"));
    }

    #[test]
    fn push_with_mistyped_field_is_dropped() {
        let payload = json!({ "ref": 7, "pusher": { "name": "alice" } });
        assert!(normalize_push_at(&payload, fixed_now()).is_none());
        assert!(normalize_push_at(&json!([1, 2, 3]), fixed_now()).is_none());
    }

    #[test]
    fn positional_array_payloads_are_dropped() {
        let push =
            json!(["refs/heads/main", { "name": "mallory" }, null, null]);
        assert!(normalize_push_at(&push, fixed_now()).is_none());

        let pull_request = json!(["opened", null, null]);
        assert!(
            normalize_pull_request_at(&pull_request, fixed_now()).is_none()
        );
    }

    #[test]
    fn nested_array_fields_are_dropped() {
        let push = json!({
            "ref": "refs/heads/main",
            "pusher": ["alice"],
            "head_commit": { "id": "abc", "timestamp": "2024-03-21T10:30:00Z" }
        });
        assert!(normalize_push_at(&push, fixed_now()).is_none());

        let pull_request = json!({
            "action": "opened",
            "pull_request": [
                "2001", ["bob"], null, null, "2024-04-01T09:00:00Z"
            ]
        });
        assert!(
            normalize_pull_request_at(&pull_request, fixed_now()).is_none()
        );
    }

    #[test]
    fn push_with_unparseable_timestamp_is_dropped() {
        let payload = json!({
            "ref": "refs/heads/main",
            "head_commit": { "id": "abc", "timestamp": "last tuesday" }
        });
        assert!(normalize_push_at(&payload, fixed_now()).is_none());
    }

    #[test]
    fn opened_pull_request() {
        let record = normalize_pull_request_at(
            &pull_request_payload("opened", false),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(record.action, ActionKind::PullRequest);
        assert_eq!(record.request_id, "2001");
        assert_eq!(record.author, "bob");
        assert_eq!(record.from_branch, "feature/login");
        assert_eq!(record.to_branch, "main");
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(
            record.message,
            concat!(
                r#""bob" submitted a pull request from "feature/login" "#,
                r#"to "main" on 1st April 2024 - 09:00 AM UTC"#
            )
        );
        assert_eq!(record.repository.as_deref(), Some("acme/widgets"));
    }

    #[test]
    fn merged_pull_request_uses_merge_time() {
        let record = normalize_pull_request_at(
            &pull_request_payload("closed", true),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(record.action, ActionKind::Merge);
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 4, 3, 17, 20, 0).unwrap()
        );
        assert_eq!(
            record.message,
            concat!(
                r#""bob" merged branch "feature/login" to "main" "#,
                "on 3rd April 2024 - 05:20 PM UTC"
            )
        );
    }

    #[test]
    fn merged_pull_request_without_merge_time_uses_creation_time() {
        let mut payload = pull_request_payload("closed", true);
        payload["pull_request"]["merged_at"] = Value::Null;

        let record = normalize_pull_request_at(&payload, fixed_now()).unwrap();
        assert_eq!(record.action, ActionKind::Merge);
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn closed_without_merge_is_filtered() {
        assert!(
            normalize_pull_request_at(
                &pull_request_payload("closed", false),
                fixed_now()
            )
            .is_none()
        );

        let mut payload = pull_request_payload("closed", false);
        payload["pull_request"]
            .as_object_mut()
            .unwrap()
            .remove("merged");
        assert!(normalize_pull_request_at(&payload, fixed_now()).is_none());
    }

    #[test]
    fn other_lifecycle_tags_are_filtered() {
        for action in ["reopened", "synchronize", "edited", "labeled"] {
            assert!(
                normalize_pull_request_at(
                    &pull_request_payload(action, true),
                    fixed_now()
                )
                .is_none(),
                "{action} should not produce a record"
            );
        }
        assert!(normalize_pull_request_at(&json!({}), fixed_now()).is_none());
    }

    #[test]
    fn opened_pull_request_defaults_missing_fields() {
        let record = normalize_pull_request_at(
            &json!({ "action": "opened" }),
            fixed_now(),
        )
        .unwrap();

        assert_eq!(record.request_id, UNKNOWN);
        assert_eq!(record.author, UNKNOWN);
        assert_eq!(record.from_branch, UNKNOWN);
        assert_eq!(record.to_branch, UNKNOWN);
        assert_eq!(record.timestamp, fixed_now());
    }

    #[test]
    fn pull_request_with_mistyped_field_is_dropped() {
        let payload = json!({
            "action": "opened",
            "pull_request": { "user": { "login": 12 } }
        });
        assert!(normalize_pull_request_at(&payload, fixed_now()).is_none());
    }
}
