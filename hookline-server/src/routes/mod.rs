use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use hookline_core::api_routes;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    AppState,
    handlers::{activities, system, view, webhook},
};

/// GitHub caps webhook payloads at 25 MB.
pub const WEBHOOK_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Routes without middleware, still awaiting their state.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(api_routes::INDEX, get(view::recent_activity_page))
        .route(
            api_routes::WEBHOOK,
            post(webhook::receive_webhook)
                .layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT)),
        )
        .route(api_routes::ACTIVITIES, get(activities::list_activities))
        .route(api_routes::PING, get(system::ping))
        .route(api_routes::HEALTH, get(system::health))
}

/// Full application: routes, CORS (dev mode only) and request tracing.
pub fn create_app(state: AppState) -> Router {
    let mut app = create_router();

    if state.config().dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
