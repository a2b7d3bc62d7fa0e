//! redb implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{KeyScheme, Link, LinkKey};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::redb_store::{Namespace, RedbStore, StoreError};
use crate::utils::short_code::ShortCodeCodec;

/// Link repository storing URL records in one namespace of a [`RedbStore`].
///
/// redb is synchronous, so every call is moved onto tokio's blocking pool.
pub struct RedbLinkRepository {
    store: Arc<RedbStore>,
    codec: Arc<ShortCodeCodec>,
    namespace: Namespace,
    key_scheme: KeyScheme,
}

impl RedbLinkRepository {
    /// Creates a repository bound to `namespace`, creating the namespace if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the namespace cannot be created.
    pub fn new(
        store: Arc<RedbStore>,
        codec: Arc<ShortCodeCodec>,
        namespace: &str,
        key_scheme: KeyScheme,
    ) -> Result<Self, StoreError> {
        let namespace = store.ensure_namespace(namespace)?;

        Ok(Self {
            store,
            codec,
            namespace,
            key_scheme,
        })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&RedbStore) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();

        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Storage task failed");
                AppError::internal("Storage task failed", json!({ "reason": e.to_string() }))
            })?
    }
}

#[async_trait]
impl LinkRepository for RedbLinkRepository {
    async fn create(&self, long_url: &str) -> Result<Link, AppError> {
        let codec = self.codec.clone();
        let namespace = self.namespace.name().to_string();
        let key_scheme = self.key_scheme;
        let long_url = long_url.to_string();

        self.blocking(move |store| {
            let link = store.update(move |tx| {
                let ns = tx.ensure_namespace(&namespace)?;
                let id = tx.next_sequence(&ns)?;
                let code = codec.encode_id(id);
                let key = key_scheme.key_for(id, &code);

                tx.put(&ns, &key.to_bytes(), long_url.as_bytes())?;

                Ok::<_, StoreError>(Link::new(id, code, long_url))
            })?;

            Ok(link)
        })
        .await
    }

    async fn find_long_url(&self, key: &LinkKey) -> Result<Option<String>, AppError> {
        let namespace = self.namespace.clone();
        let key = key.to_bytes();

        self.blocking(move |store| {
            let Some(bytes) = store.get(&namespace, &key)? else {
                return Ok(None);
            };

            let long_url = String::from_utf8(bytes).map_err(|_| StoreError::CorruptRecord {
                namespace: namespace.name().to_string(),
            })?;

            Ok(Some(long_url))
        })
        .await
    }

    async fn issued_count(&self) -> Result<u64, AppError> {
        let namespace = self.namespace.clone();

        self.blocking(move |store| Ok(store.current_sequence(&namespace)?))
            .await
    }
}
