//! Route handlers.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::response::{not_found, HealthBody, JsonResponse, MessagesBody, StoredBody};
use crate::http::server::AppState;
use crate::ingest::{normalize, parse_body};
use crate::store::message::now_ms;

pub async fn health() -> Response {
    JsonResponse::ok(HealthBody {
        ok: true,
        now: now_ms(),
    })
    .into_response()
}

/// `GET /messages[?since=<int>]`
pub async fn list_messages(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let since = parse_since(query.as_deref());
    let page = state.store.query(since);

    tracing::debug!(
        since = ?since,
        returned = page.messages.len(),
        next_cursor = ?page.next_cursor,
        "Listing messages"
    );

    JsonResponse::ok(MessagesBody {
        ok: true,
        messages: page.messages,
        next_cursor: page.next_cursor,
    })
    .into_response()
}

/// `POST /messages` with a JSON or plain-text body.
pub async fn post_messages(State(state): State<AppState>, body: Bytes) -> Response {
    let raw_text = String::from_utf8_lossy(&body);
    let payload = parse_body(&raw_text);
    let drafts = normalize(payload, &raw_text);
    let stored = state.store.append_all(drafts);

    tracing::debug!(
        body_bytes = body.len(),
        stored = stored.len(),
        buffered = state.store.len(),
        "Messages ingested"
    );

    JsonResponse::ok(StoredBody { ok: true, stored }).into_response()
}

/// Preflight for any path, 404 for everything else unmatched.
pub async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    not_found()
}

/// First non-blank `since` value that parses as an integer.
///
/// Anything malformed is treated as if no filter was given.
pub fn parse_since(query: Option<&str>) -> Option<i64> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "since" && !value.trim().is_empty())
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_since() {
        assert_eq!(parse_since(None), None);
        assert_eq!(parse_since(Some("since=1700")), Some(1700));
        assert_eq!(parse_since(Some("a=b&since=%2042%20")), Some(42));
        assert_eq!(parse_since(Some("since=&since=5")), Some(5));
        assert_eq!(parse_since(Some("since=abc")), None);
        assert_eq!(parse_since(Some("since=1.5")), None);
        assert_eq!(parse_since(Some("until=5")), None);
    }
}
