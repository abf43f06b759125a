use axum::{extract::State, response::Html};
use tracing::error;

use crate::{AppState, view::render_activity_page};

pub const LOAD_FAILURE_MESSAGE: &str = "Recent activity could not be loaded";

/// Recent-activity page. A store failure degrades to an empty list with an
/// error banner rather than an error status.
pub async fn recent_activity_page(
    State(state): State<AppState>,
) -> Html<String> {
    let limit = state.config().view.recent_limit;

    match state.store().list_recent(Some(limit)).await {
        Ok(activities) => Html(render_activity_page(&activities, None)),
        Err(err) => {
            error!(error = %err, "Failed to load recent activity");
            Html(render_activity_page(&[], Some(LOAD_FAILURE_MESSAGE)))
        }
    }
}
