//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`        - Shorten a URL
//! - `GET  /`        - Always 404 (no code)
//! - `GET  /{code}`  - Short link redirect
//!
//! Any other method on these paths answers 405 with an `Allow` header.
//! Paths that match neither route answer 404.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api::handlers::{method_not_allowed, redirect_handler, root_handler, shorten_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(root_handler)
                .post(shorten_handler)
                .fallback(|method: Method| async move {
                    method_not_allowed(method, "GET, HEAD, POST")
                }),
        )
        .route(
            "/{code}",
            get(redirect_handler).fallback(|method: Method| async move {
                method_not_allowed(method, "GET, HEAD")
            }),
        )
        .fallback(root_handler)
        .with_state(state)
        .layer(tracing::layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::LinkService;
    use crate::domain::entities::KeyScheme;
    use crate::infrastructure::persistence::{RedbLinkRepository, RedbStore};
    use crate::utils::short_code::ShortCodeCodec;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_router(dir: &tempfile::TempDir) -> Router {
        let store = Arc::new(RedbStore::open(dir.path().join("routes.db")).unwrap());
        let codec = Arc::new(ShortCodeCodec::new("magcargo", 5).unwrap());
        let repo =
            RedbLinkRepository::new(store, codec.clone(), "magcargo", KeyScheme::Code).unwrap();
        let service = LinkService::new(Arc::new(repo), codec, KeyScheme::Code);

        app_router(AppState::new(Arc::new(service)))
    }

    #[tokio::test]
    async fn test_patch_on_code_is_method_not_allowed() {
        let dir = tempfile::tempdir().unwrap();

        let response = test_router(&dir)
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/ykMek")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, HEAD");
    }

    #[tokio::test]
    async fn test_head_on_unknown_code_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let response = test_router(&dir)
            .oneshot(
                Request::builder()
                    .method(Method::HEAD)
                    .uri("/ykMek")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_shorten_then_redirect() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let created = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("url=https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let redirect = router
            .oneshot(
                Request::builder()
                    .uri("/ykMek")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            redirect.headers()[header::LOCATION],
            "https://example.com/a?b=c"
        );
    }
}
