//! Axum router assembly.

use axum::Router;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hbnb_app::ports::Storage;

use crate::api::{reviews, stats};
use crate::error::error_response;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem. Unknown paths answer
/// `404 {"error": "Not found"}`.
pub fn build<S: Storage>(state: AppState<S>) -> Router {
    Router::new()
        .route("/status", get(stats::status))
        .route("/stats", get(stats::stats::<S>))
        .route(
            "/places/{place_id}/reviews",
            get(reviews::list::<S>).post(reviews::create::<S>),
        )
        .route(
            "/reviews/{review_id}",
            get(reviews::get::<S>)
                .put(reviews::update::<S>)
                .delete(reviews::delete::<S>),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
