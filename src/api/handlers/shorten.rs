//! Handler for link shortening endpoint.

use axum::{
    extract::{
        Form, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use tracing::warn;

use crate::api::dto::shorten::ShortenForm;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request
///
/// The `url` field is read from an `application/x-www-form-urlencoded` body.
/// When the body carries no form (or no `url` field), the `url` query
/// parameter is used instead.
///
/// ```text
/// POST / HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// url=https%3A%2F%2Fexample.com
/// ```
///
/// # Response
///
/// `201 Created` with the short code as a `text/plain` body.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid.
/// Returns 500 Internal Server Error if the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    query: Result<Query<ShortenForm>, QueryRejection>,
    body: Result<Form<ShortenForm>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let query = match query {
        Ok(Query(form)) => Some(form),
        Err(rejection) => {
            warn!(error = %rejection, "Malformed query string");
            return Err(AppError::bad_request(
                "Malformed query string",
                json!({ "reason": rejection.body_text() }),
            ));
        }
    };

    let body = match body {
        Ok(Form(form)) => Some(form),
        Err(FormRejection::InvalidFormContentType(_)) => None,
        Err(rejection) => {
            warn!(error = %rejection, "Malformed form body");
            return Err(AppError::bad_request(
                "Malformed form body",
                json!({ "reason": rejection.body_text() }),
            ));
        }
    };

    let long_url = ShortenForm::merge(body, query).unwrap_or_default();

    let link = state.link_service.shorten(&long_url).await?;

    Ok((StatusCode::CREATED, link.code))
}
