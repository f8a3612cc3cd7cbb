use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/forecast", post(handlers::submit_form))
        .route("/api/forecast", post(handlers::forecast))
        .route("/api/defaults", get(handlers::get_defaults))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
