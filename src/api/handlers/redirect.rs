//! Handlers for short URL redirect and unmatched requests.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{error, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `303 See Other` with `Location` set to the stored URL, byte for byte.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if the code cannot be decoded (id key scheme).
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.link_service.resolve(&code).await?;

    let location = HeaderValue::from_str(&long_url).map_err(|e| {
        error!(code = %code, error = %e, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL is not redirectable", json!({}))
    })?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]))
}

/// `GET /` has no code to resolve.
pub async fn root_handler() -> AppError {
    AppError::not_found("Short link not found", json!({}))
}

/// Rejects a method the route does not serve.
pub fn method_not_allowed(method: Method, allow: &'static str) -> AppError {
    warn!(method = %method, "Method not allowed");
    AppError::method_not_allowed(method.as_str(), allow)
}
