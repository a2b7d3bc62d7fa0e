//! Infrastructure layer for external integrations.
//!
//! Implements the repository contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - redb-backed storage

pub mod persistence;
