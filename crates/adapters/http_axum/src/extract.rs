//! Request body extraction.

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};

use hbnb_domain::payload::Payload;

/// Extracts the request body as a [`Payload`].
///
/// Never rejects: a missing or non-JSON content type, an unreadable body, or
/// a body that is not a JSON object all become [`Payload::Invalid`], leaving
/// the service to decide when that matters.
pub struct JsonPayload(pub Payload);

impl<S: Send + Sync> FromRequest<S> for JsonPayload {
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(Self(Payload::Invalid));
        }
        let payload = match Bytes::from_request(req, state).await {
            Ok(bytes) => Payload::from_json_slice(&bytes),
            Err(_) => Payload::Invalid,
        };
        Ok(Self(payload))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let Some((kind, subtype)) = essence.split_once('/') else {
        return false;
    };
    kind == "application" && (subtype == "json" || subtype.ends_with("+json"))
}
