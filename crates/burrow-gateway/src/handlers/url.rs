use crate::model::CreateUrlRequest;
use crate::response::{
    ApiResponse, METHOD_NOT_ALLOWED_MESSAGE, PREFLIGHT_MESSAGE, WELCOME_MESSAGE,
};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use burrow_core::ShortUrlId;
use tracing::{debug, info};

/// Pulls `originalUrl` out of a create body. Anything unparseable becomes
/// the empty string, which the lifecycle rejects as invalid.
fn original_url_from_body(body: &[u8]) -> String {
    match serde_json::from_slice::<CreateUrlRequest>(body) {
        Ok(request) => request.original_url,
        Err(e) => {
            debug!(error = %e, "create body is not a usable json object");
            String::new()
        }
    }
}

async fn create(state: &AppState, path: &str, body: &[u8]) -> ApiResponse {
    let original_url = original_url_from_body(body);
    let outcome = state.lifecycle().create(path, &original_url).await;
    info!(path = %path, outcome = outcome.kind(), "create request handled");
    outcome.into()
}

async fn resolve(state: &AppState, id: &str) -> ApiResponse {
    let outcome = state
        .lifecycle()
        .resolve(&ShortUrlId::from_request(id))
        .await;
    info!(id = %id, outcome = outcome.kind(), "redirect request handled");
    outcome.into()
}

pub async fn create_url_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Bytes,
) -> ApiResponse {
    create(&state, uri.path(), &body).await
}

pub async fn resolve_url_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> ApiResponse {
    resolve(&state, &id).await
}

pub async fn welcome_handler() -> ApiResponse {
    ApiResponse::Message(StatusCode::OK, WELCOME_MESSAGE)
}

pub async fn preflight_handler() -> ApiResponse {
    debug!("answering preflight request");
    ApiResponse::Message(StatusCode::OK, PREFLIGHT_MESSAGE)
}

pub async fn method_not_allowed_handler(method: Method) -> ApiResponse {
    info!(method = %method, "rejecting unsupported method");
    ApiResponse::ClientError(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// Catches paths no route matches, e.g. `/a/b`, and dispatches on method
/// alone.
pub async fn fallback_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> ApiResponse {
    match method {
        Method::POST => create(&state, uri.path(), &body).await,
        Method::GET | Method::HEAD => resolve(&state, uri.path().trim_start_matches('/')).await,
        Method::OPTIONS => preflight_handler().await,
        other => method_not_allowed_handler(other).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_with_original_url() {
        assert_eq!(
            original_url_from_body(br#"{"originalUrl":"https://example.com"}"#),
            "https://example.com"
        );
    }

    #[test]
    fn unusable_bodies_become_empty() {
        for body in [&b""[..], b"not json", b"{}", br#"{"originalUrl":42}"#, b"[]"] {
            assert_eq!(original_url_from_body(body), "");
        }
    }
}
