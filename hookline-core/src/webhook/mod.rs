//! Webhook intake: payload schema, normalizers and routing.
//!
//! Everything here is synchronous and free of shared state, so it can run on
//! any request task without coordination.

pub mod normalize;
pub mod payload;
pub mod router;

pub use normalize::{branch_from_ref, normalize_pull_request, normalize_push};
pub use router::{Disposition, EventKind, route};
