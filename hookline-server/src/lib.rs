//! # Hookline Server
//!
//! HTTP boundary around `hookline-core`:
//!
//! - `POST /webhook` validates a delivery, routes it through the normalizer and
//!   stores the resulting activity
//! - `GET /api/actions` lists every stored activity, newest first
//! - `GET /` renders the most recent activities as an HTML page
//! - `GET /ping` and `GET /health` report liveness and store reachability
//!
//! The store handle is built once at startup and carried in [`AppState`].

pub mod handlers;
pub mod infra;
pub mod routes;
pub mod view;

pub use infra::app_state::AppState;
pub use routes::create_app;
