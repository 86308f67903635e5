//! JSON REST handlers for reviews.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use hbnb_app::ports::Storage;
use hbnb_domain::review::Review;

use crate::error::ApiError;
use crate::extract::JsonPayload;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Review>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Review>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Review>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    /// `200` with an empty JSON object.
    Ok,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => Json(json!({})).into_response(),
        }
    }
}

/// `GET /places/{place_id}/reviews`
pub async fn list<S: Storage>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let reviews = state.review_service.list_reviews(&place_id).await?;
    Ok(ListResponse::Ok(Json(reviews)))
}

/// `GET /reviews/{review_id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let review = state.review_service.get_review(&review_id).await?;
    Ok(GetResponse::Ok(Json(review)))
}

/// `DELETE /reviews/{review_id}`
pub async fn delete<S: Storage>(
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    state.review_service.delete_review(&review_id).await?;
    Ok(DeleteResponse::Ok)
}

/// `POST /places/{place_id}/reviews`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(place_id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<CreateResponse, ApiError> {
    let review = state
        .review_service
        .create_review(&place_id, payload)
        .await?;
    Ok(CreateResponse::Created(Json(review)))
}

/// `PUT /reviews/{review_id}`
pub async fn update<S: Storage>(
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> Result<GetResponse, ApiError> {
    let review = state
        .review_service
        .update_review(&review_id, payload)
        .await?;
    Ok(GetResponse::Ok(Json(review)))
}
