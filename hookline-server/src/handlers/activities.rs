use axum::{Json, extract::State};
use hookline_core::StoredActivity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AppState, infra::errors::AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityList {
    pub success: bool,
    pub actions: Vec<StoredActivity>,
}

/// Every stored activity, newest first.
pub async fn list_activities(
    State(state): State<AppState>,
) -> AppResult<Json<ActivityList>> {
    let actions = state.store().list_recent(None).await?;
    debug!(count = actions.len(), "Listing activities");

    Ok(Json(ActivityList {
        success: true,
        actions,
    }))
}
