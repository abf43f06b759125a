//! Repository ports (interfaces) consumed by the server.

pub mod activities;
