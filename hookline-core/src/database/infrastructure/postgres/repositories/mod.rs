//! PostgreSQL-backed repository implementations.

pub mod activities;
