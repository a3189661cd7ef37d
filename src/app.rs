use crate::handlers::{self, ServerState};
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/fragment", get(handlers::fragment))
        .route("/api/state", get(handlers::api_state))
        .route("/api/alerts", get(handlers::api_alerts))
        .route("/api/refresh", post(handlers::refresh))
        .with_state(state)
}
