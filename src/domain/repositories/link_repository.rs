//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkKey};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedbLinkRepository`] - embedded redb implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Allocates the next id, derives its short code and stores the URL.
    ///
    /// Allocation and the write of the URL record happen in one transaction:
    /// an id is never visible without its record, and a failed call leaves
    /// the sequence untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, long_url: &str) -> Result<Link, AppError>;

    /// Looks up the original URL stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if the key or the whole namespace is missing
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_long_url(&self, key: &LinkKey) -> Result<Option<String>, AppError>;

    /// Returns the last id allocated in this repository's namespace, or 0.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn issued_count(&self) -> Result<u64, AppError>;
}
