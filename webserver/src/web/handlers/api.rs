//! REST API handlers
//!
//! Thin translation between HTTP and the tally stores

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{FeedbackMessages, HistoryResponse, PrimeResponse};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;

/// Home page - GET /
pub async fn home() -> &'static str {
    "Home!"
}

/// Primality lookup - GET /primes/{number}
///
/// Only digit segments are routed; anything else is an unknown page.
/// Digit strings that do not fit the integer range are a bad request.
pub async fn lookup_prime(
    State(state): State<WebServerState>,
    Path(raw): Path<String>,
) -> WebServerResult<Json<PrimeResponse>> {
    let number = parse_number(&raw)?;

    state.tallies.update(number).await;
    let response = state.tallies.resolve(number, &state.rules).await?;
    Ok(Json(response))
}

/// Lookup counts - GET /history
pub async fn history(State(state): State<WebServerState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        requests: state.tallies.snapshot().await,
    })
}

/// Active feedback rules - GET /messages
pub async fn get_messages(State(state): State<WebServerState>) -> Json<FeedbackMessages> {
    Json(state.rules.get().await)
}

/// Replace the feedback rules - POST /messages
pub async fn post_messages(State(state): State<WebServerState>, body: Bytes) -> WebServerResult<StatusCode> {
    let messages: FeedbackMessages =
        serde_json::from_slice(&body).map_err(|_| WebServerError::InvalidRequest {
            body: String::from_utf8_lossy(&body).into_owned(),
        })?;

    state.rules.update(messages).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    WebServerError::NotFound
}

/// Fallback for known routes called with an unsupported method
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "No can do")
}

/// Fallback for `/primes/{number}` called with an unsupported method
///
/// Only digit segments belong to the route, so anything else stays unknown.
pub async fn primes_method_not_allowed(Path(raw): Path<String>) -> Response {
    if is_digit_segment(&raw) {
        method_not_allowed().await.into_response()
    } else {
        WebServerError::NotFound.into_response()
    }
}

fn is_digit_segment(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(raw: &str) -> WebServerResult<i64> {
    if !is_digit_segment(raw) {
        return Err(WebServerError::NotFound);
    }
    raw.parse().map_err(|_| WebServerError::NotAnInteger {
        input: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("17").unwrap(), 17);
        assert_eq!(parse_number("007").unwrap(), 7);
        assert!(matches!(parse_number("non-prime"), Err(WebServerError::NotFound)));
        assert!(matches!(parse_number("-3"), Err(WebServerError::NotFound)));
        assert!(matches!(parse_number(""), Err(WebServerError::NotFound)));
        assert!(matches!(
            parse_number("99999999999999999999"),
            Err(WebServerError::NotAnInteger { .. })
        ));
    }
}
