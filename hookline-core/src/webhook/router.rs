use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::normalize::{normalize_pull_request_at, normalize_push_at};
use crate::activity::ActivityRecord;

/// Event family named by the sender's event-kind header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    PullRequest,
    Other(String),
}

impl EventKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "push" => EventKind::Push,
            "pull_request" => EventKind::PullRequest,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Push => "push",
            EventKind::PullRequest => "pull_request",
            EventKind::Other(other) => other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What became of one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The payload produced an activity to store.
    Record(ActivityRecord),
    /// A handled event kind that does not produce an activity here: a filtered
    /// lifecycle tag or a payload that could not be modelled.
    NoRecord,
    /// An event kind Hookline does not process at all.
    Unhandled { event_kind: String },
}

impl Disposition {
    pub fn label(&self) -> &'static str {
        match self {
            Disposition::Record(_) => "record",
            Disposition::NoRecord => "no_record",
            Disposition::Unhandled { .. } => "unhandled",
        }
    }
}

/// Dispatch a delivery to the normalizer for its event kind.
pub fn route(event_kind: &str, payload: &Value) -> Disposition {
    route_at(event_kind, payload, Utc::now())
}

pub(crate) fn route_at(
    event_kind: &str,
    payload: &Value,
    now: DateTime<Utc>,
) -> Disposition {
    let normalized = match EventKind::parse(event_kind) {
        EventKind::Push => normalize_push_at(payload, now),
        EventKind::PullRequest => normalize_pull_request_at(payload, now),
        EventKind::Other(event_kind) => {
            return Disposition::Unhandled { event_kind };
        }
    };

    match normalized {
        Some(record) => Disposition::Record(record),
        None => Disposition::NoRecord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActionKind;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn event_kind_round_trips_labels() {
        assert_eq!(EventKind::parse("push"), EventKind::Push);
        assert_eq!(EventKind::parse("pull_request"), EventKind::PullRequest);
        assert_eq!(
            EventKind::parse("issues"),
            EventKind::Other("issues".into())
        );
        assert_eq!(EventKind::parse("issues").to_string(), "issues");
    }

    #[test]
    fn push_routes_to_record() {
        let payload = json!({
            "ref": "refs/heads/dev",
            "pusher": { "name": "dana" }
        });
        match route_at("push", &payload, now()) {
            Disposition::Record(record) => {
                assert_eq!(record.action, ActionKind::Push);
                assert_eq!(record.to_branch, "dev");
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn unmerged_close_routes_to_no_record() {
        let payload = json!({
            "action": "closed",
            "pull_request": { "merged": false, "id": 9 }
        });
        assert_eq!(
            route_at("pull_request", &payload, now()),
            Disposition::NoRecord
        );
    }

    #[test]
    fn unknown_kinds_are_unhandled_not_no_record() {
        let disposition =
            route_at("issues", &json!({ "action": "opened" }), now());
        assert_eq!(
            disposition,
            Disposition::Unhandled {
                event_kind: "issues".into()
            }
        );
        assert_eq!(disposition.label(), "unhandled");
    }

    #[test]
    fn event_kind_match_is_exact() {
        assert!(matches!(
            route_at("Push", &json!({}), now()),
            Disposition::Unhandled { .. }
        ));
    }

    #[test]
    fn array_payloads_are_no_record() {
        let push =
            json!(["refs/heads/main", { "name": "mallory" }, null, null]);
        assert_eq!(route_at("push", &push, now()), Disposition::NoRecord);
        assert_eq!(
            route_at("pull_request", &json!(["opened", null, null]), now()),
            Disposition::NoRecord
        );
    }

    #[test]
    fn malformed_payload_is_no_record() {
        assert_eq!(
            route_at("pull_request", &json!("just a string"), now()),
            Disposition::NoRecord
        );
    }
}
