//! # magcargo
//!
//! A small URL shortener built with Axum and an embedded redb database.
//!
//! `POST /` with a `url` form field returns a short code; `GET /{code}`
//! redirects to the stored URL. Codes are reversible, salted encodings of a
//! per-namespace sequence number, so they are short, unique and not trivially
//! enumerable.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link entity, key schemes and repository trait
//! - **Application Layer** ([`application`]) - Shortening and resolution logic
//! - **Infrastructure Layer** ([`infrastructure`]) - redb store and repository
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -- --salt "this is my salt" --port 8080
//!
//! curl -i -d url=https://example.com http://localhost:8080/
//! curl -i http://localhost:8080/<code>
//! ```
//!
//! ## Configuration
//!
//! Flags and environment variables are described in [`config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{KeyScheme, Link, LinkKey};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{RedbLinkRepository, RedbStore};
    pub use crate::state::AppState;
    pub use crate::utils::short_code::ShortCodeCodec;
}
