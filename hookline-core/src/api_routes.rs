//! Paths served by `hookline-server`.
//!
//! The webhook path is what gets configured on the hosting side, so it stays
//! unversioned.

pub const INDEX: &str = "/";
pub const WEBHOOK: &str = "/webhook";
pub const ACTIVITIES: &str = "/api/actions";
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

/// Header carrying the sender's event kind (`push`, `pull_request`, ...).
pub const EVENT_KIND_HEADER: &str = "x-github-event";

/// Header carrying the sender's delivery id, logged when present.
pub const DELIVERY_ID_HEADER: &str = "x-github-delivery";
