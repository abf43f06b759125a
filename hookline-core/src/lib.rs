//! # Hookline Core
//!
//! Core library for the Hookline activity feed: canonical activity records,
//! webhook event normalization, and the activity store abstraction.
//!
//! ## Overview
//!
//! `hookline-core` turns loosely-shaped webhook payloads into one uniform
//! [`ActivityRecord`](activity::ActivityRecord):
//!
//! - **Timestamp formatting**: ISO-8601 strings rendered as
//!   `21st March 2024 - 10:30 AM UTC`, echoing input it cannot parse
//! - **Event normalization**: push and pull-request payloads decoded into
//!   schema structs with explicit defaults
//! - **Event routing**: a tri-state [`Disposition`](webhook::Disposition) per
//!   inbound delivery (record, no record, unhandled)
//! - **Activity storage**: the
//!   [`ActivityStore`](database::ports::activities::ActivityStore) port with
//!   PostgreSQL and in-memory adapters
//!
//! ## Feature Flags
//!
//! - `database` (default): PostgreSQL adapter, embedded migrations and
//!   [`MIGRATOR`]
//!
//! ## Examples
//!
//! ```no_run
//! use hookline_core::webhook::{Disposition, route};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "ref": "refs/heads/main",
//!     "pusher": { "name": "alice" },
//!     "head_commit": { "id": "abc123", "timestamp": "2024-03-21T10:30:00Z" }
//! });
//!
//! if let Disposition::Record(record) = route("push", &payload) {
//!     println!("{}", record.message);
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Canonical activity records and action kinds
pub mod activity;

/// Route and header constants shared between the server and its tests
pub mod api_routes;

/// Activity store port and adapters
pub mod database;

/// Error types and error handling utilities
pub mod error;

/// Human-readable timestamp rendering
pub mod timestamp;

/// Webhook payload schema, normalizers and event routing
pub mod webhook;

/// Embedded schema migrations for the PostgreSQL activity store
#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use activity::{ActionKind, ActivityRecord, StoredActivity};
pub use error::{ActivityError, Result};
pub use webhook::{Disposition, EventKind, route};
