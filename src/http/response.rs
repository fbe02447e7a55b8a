//! Response bodies and JSON encoding.
//!
//! Every JSON response carries an explicit length, a UTF-8 content type
//! and `Cache-Control: no-store`. CORS headers are added by the router.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::store::Message;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBody {
    pub ok: bool,
    pub now: i64,
}

/// `GET /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesBody {
    pub ok: bool,
    pub messages: Vec<Message>,
    pub next_cursor: Option<i64>,
}

/// `POST /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredBody {
    pub ok: bool,
    pub stored: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// A serializable body paired with its status code.
pub struct JsonResponse<T>(pub StatusCode, pub T);

impl<T: Serialize> JsonResponse<T> {
    pub fn ok(body: T) -> Self {
        Self(StatusCode::OK, body)
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let JsonResponse(status, body) = self;
        let bytes = match serde_json::to_vec(&body) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        let length = bytes.len();
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
        response
    }
}

/// 404 with `{ok: false, error: "Not found"}`.
pub fn not_found() -> Response {
    JsonResponse(
        StatusCode::NOT_FOUND,
        ErrorBody {
            ok: false,
            error: "Not found".to_string(),
        },
    )
    .into_response()
}
