//! Embedded storage implementations.
//!
//! # Components
//!
//! - [`RedbStore`] - Transactional key-value store with per-namespace sequences
//! - [`RedbLinkRepository`] - Link storage and retrieval on top of [`RedbStore`]

pub mod redb_link_repository;
pub mod redb_store;

pub use redb_link_repository::RedbLinkRepository;
pub use redb_store::{Namespace, ReadScope, RedbStore, StoreError, WriteScope};
