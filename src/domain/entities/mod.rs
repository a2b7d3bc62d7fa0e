//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without storage or HTTP concerns.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`KeyScheme`] - How URL records are keyed in the store
//! - [`LinkKey`] - The key of a single URL record

pub mod link;

pub use link::{KeyScheme, Link, LinkKey, ParseKeySchemeError};
