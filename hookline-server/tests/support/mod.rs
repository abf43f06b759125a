#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use hookline_config::{
    Config, ConfigMetadata, DatabaseConfig, ServerConfig, ViewConfig,
};
use hookline_core::database::{ActivityStore, InMemoryActivityStore};
use hookline_server::{AppState, create_app};
use serde_json::{Value, json};

pub fn test_config() -> Config {
    Config {
        server: ServerConfig::default(),
        database: DatabaseConfig::default(),
        view: ViewConfig::default(),
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

pub fn build_server(store: Arc<dyn ActivityStore>) -> Result<TestServer> {
    build_server_with_config(store, test_config())
}

pub fn build_server_with_config(
    store: Arc<dyn ActivityStore>,
    config: Config,
) -> Result<TestServer> {
    let state = AppState::new(store, Arc::new(config));
    TestServer::new(create_app(state)).map_err(|err| anyhow!(err.to_string()))
}

/// Server over a fresh in-memory store, returning the store for inspection.
pub fn memory_server() -> Result<(TestServer, Arc<InMemoryActivityStore>)> {
    let store = Arc::new(InMemoryActivityStore::new());
    let server = build_server(store.clone())?;
    Ok((server, store))
}

pub fn push_payload(sha: &str, pusher: &str, timestamp: &str) -> Value {
    json!({
        "ref": "refs/heads/main",
        "pusher": { "name": pusher },
        "head_commit": { "id": sha, "timestamp": timestamp },
        "repository": { "full_name": "octo/hookline" }
    })
}

pub fn pull_request_payload(
    action: &str,
    merged: bool,
    created_at: &str,
    merged_at: Option<&str>,
) -> Value {
    json!({
        "action": action,
        "pull_request": {
            "id": 42,
            "user": { "login": "bob" },
            "head": { "ref": "feature" },
            "base": { "ref": "main" },
            "created_at": created_at,
            "merged_at": merged_at,
            "merged": merged
        },
        "repository": { "full_name": "octo/hookline" }
    })
}
