//! HTTP layer: request extraction, handlers and middleware.
//!
//! Handlers translate requests into [`crate::application::services::LinkService`]
//! calls and map [`crate::error::AppError`] into responses. Routing lives in
//! [`crate::routes`].
//!
//! # Modules
//!
//! - [`dto`] - Request payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
