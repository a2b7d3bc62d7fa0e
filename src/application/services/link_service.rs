//! Link shortening and resolution service.

use std::sync::Arc;

use crate::domain::entities::{KeyScheme, Link, LinkKey};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::short_code::ShortCodeCodec;
use crate::utils::url_validator::validate_url;
use serde_json::json;
use tracing::{debug, info};

/// Service for creating and resolving shortened links.
///
/// Holds shared handles built once at startup; it keeps no per-request state.
pub struct LinkService<L: LinkRepository> {
    link_repository: Arc<L>,
    codec: Arc<ShortCodeCodec>,
    key_scheme: KeyScheme,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `key_scheme` must match the scheme the repository writes with.
    pub fn new(link_repository: Arc<L>, codec: Arc<ShortCodeCodec>, key_scheme: KeyScheme) -> Self {
        Self {
            link_repository,
            codec,
            key_scheme,
        }
    }

    /// Shortens `long_url`.
    ///
    /// Input is validated before touching the store, so a rejected request
    /// never consumes a sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is blank or not an
    /// absolute URL.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(&self, long_url: &str) -> Result<Link, AppError> {
        validate_url(long_url).map_err(|e| {
            debug!(error = %e, "Rejected URL");
            AppError::bad_request(e.to_string(), json!({}))
        })?;

        let link = self.link_repository.create(long_url).await?;
        info!(id = link.id, code = %link.code, "Short link created");

        Ok(link)
    }

    /// Resolves a short code to the URL it was created for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the key scheme requires decoding
    /// and `code` is not a valid code for this configuration.
    ///
    /// Returns [`AppError::NotFound`] if nothing is stored for `code`.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::not_found("Short link not found", json!({})));
        }

        let key = self.key_for_code(code)?;

        self.link_repository
            .find_long_url(&key)
            .await?
            .ok_or_else(|| {
                debug!(code, "Short link not found");
                AppError::not_found("Short link not found", json!({ "code": code }))
            })
    }

    /// Number of links issued so far in the service namespace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn issued_count(&self) -> Result<u64, AppError> {
        self.link_repository.issued_count().await
    }

    fn key_for_code(&self, code: &str) -> Result<LinkKey, AppError> {
        match self.key_scheme {
            KeyScheme::Code => Ok(LinkKey::Code(code.to_string())),
            KeyScheme::Id => self.codec.decode_id(code).map(LinkKey::Id).map_err(|e| {
                debug!(code, error = %e, "Rejected short code");
                AppError::bad_request("Malformed short code", json!({ "code": code }))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    fn create_service(
        mock_link_repo: MockLinkRepository,
        key_scheme: KeyScheme,
    ) -> LinkService<MockLinkRepository> {
        let codec = Arc::new(ShortCodeCodec::new("magcargo", 5).unwrap());
        LinkService::new(Arc::new(mock_link_repo), codec, key_scheme)
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|url| Ok(Link::new(1, "ykMek".to_string(), url.to_string())));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let link = service.shorten("https://example.com").await.unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "ykMek");
        assert_eq!(link.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_keeps_url_verbatim() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .withf(|url| url == "HTTPS://Example.COM:443/Path?q=1#frag")
            .times(1)
            .returning(|url| Ok(Link::new(1, "ykMek".to_string(), url.to_string())));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service
            .shorten("HTTPS://Example.COM:443/Path?q=1#frag")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_empty_url_does_not_touch_store() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.shorten("").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_create().times(0);

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.shorten("not-a-url").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_storage_failure() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Storage failure", json!({}))));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.shorten("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_code_scheme_uses_code_directly() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_long_url()
            .withf(|key| matches!(key, LinkKey::Code(code) if code == "anything"))
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let url = service.resolve("anything").await.unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_id_scheme_decodes_code() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_long_url()
            .withf(|key| matches!(key, LinkKey::Id(2)))
            .times(1)
            .returning(|_| Ok(Some("https://example.com/2".to_string())));

        let service = create_service(mock_link_repo, KeyScheme::Id);

        let url = service.resolve("BW9b2").await.unwrap();

        assert_eq!(url, "https://example.com/2");
    }

    #[tokio::test]
    async fn test_resolve_id_scheme_malformed_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_long_url().times(0);

        let service = create_service(mock_link_repo, KeyScheme::Id);

        let result = service.resolve("ab-cd").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_long_url()
            .times(1)
            .returning(|_| Ok(None));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.resolve("zzzzz").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_empty_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_long_url().times(0);

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.resolve("").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_storage_failure() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_find_long_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Storage failure", json!({}))));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        let result = service.resolve("ykMek").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_issued_count() {
        let mut mock_link_repo = MockLinkRepository::new();

        mock_link_repo
            .expect_issued_count()
            .times(1)
            .returning(|| Ok(42));

        let service = create_service(mock_link_repo, KeyScheme::Code);

        assert_eq!(service.issued_count().await.unwrap(), 42);
    }
}
