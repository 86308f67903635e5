//! Liveness and record-count handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use hbnb_app::ports::Storage;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /status`.
#[derive(Serialize)]
pub struct Status {
    pub status: &'static str,
}

/// `GET /status`
pub async fn status() -> Json<Status> {
    Json(Status { status: "OK" })
}

/// `GET /stats`, keyed by collection name (`places`, `reviews`, `users`).
pub async fn stats<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<&'static str, usize>>, ApiError> {
    let counts = state.stats_service.counts().await?;
    Ok(Json(
        counts
            .into_iter()
            .map(|(kind, count)| (kind.collection(), count))
            .collect(),
    ))
}
