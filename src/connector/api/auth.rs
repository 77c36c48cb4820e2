use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::error::ApiError;
use super::server::AppState;

/// Session middleware guarding the API routes.
///
/// Accepts either `Authorization: Bearer <token>` or `X-Session-Token:
/// <token>` and resolves the token through the configured verifier. Requests
/// without a resolvable session are answered with the JSON 401 body before
/// any handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = request_token(&request) else {
        return Err(ApiError::unauthorized());
    };

    let session = state.container.verifier().verify(token).await?;
    let Some(session) = session else {
        return Err(ApiError::unauthorized());
    };

    debug!("Authenticated request from {}", session.email);
    Ok(next.run(request).await)
}

fn request_token(request: &Request) -> Option<&str> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    bearer.or_else(|| {
        request
            .headers()
            .get("x-session-token")
            .and_then(|value| value.to_str().ok())
    })
}
