use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::state::AppState;

pub mod auth;
pub mod events;
pub mod profile;
pub mod recycling_points;

async fn handle_404() -> AppError {
    AppError::NotFound("route")
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Event routes
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/:id", delete(events::delete_event))

        // Recycling point routes
        .route("/init-db", get(recycling_points::init_db))
        .route(
            "/api/recycling-points",
            get(recycling_points::list_recycling_points).post(recycling_points::create_recycling_point),
        )

        // Auth routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/usuario", get(profile::usuario_page))

        .fallback(handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
