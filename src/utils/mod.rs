//! Utility functions for code encoding, URL validation and startup helpers.
//!
//! - [`short_code`] - Reversible salted short code encoding
//! - [`url_validator`] - Long URL validation
//! - [`salt`] - Random salt generation

pub mod salt;
pub mod short_code;
pub mod url_validator;
