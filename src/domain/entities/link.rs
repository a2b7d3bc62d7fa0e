//! Link entity and storage key types.

use std::fmt;
use std::str::FromStr;

/// A shortened URL as handed back to the caller.
///
/// `id` is the namespace sequence number the link was allocated under and
/// `code` is its reversible encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: u64,
    pub code: String,
    pub long_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: u64, code: String, long_url: String) -> Self {
        Self { id, code, long_url }
    }
}

/// How URL records are keyed inside a namespace.
///
/// Both schemes produce the same external behavior; they differ only in the
/// bytes used as the record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyScheme {
    /// Records are keyed by the short code string.
    #[default]
    Code,
    /// Records are keyed by the sequence number as 8 big-endian bytes.
    ///
    /// Lookups decode the short code first, so malformed codes are rejected
    /// before touching the store.
    Id,
}

impl KeyScheme {
    /// Builds the storage key for a freshly allocated link.
    pub fn key_for(self, id: u64, code: &str) -> LinkKey {
        match self {
            KeyScheme::Code => LinkKey::Code(code.to_string()),
            KeyScheme::Id => LinkKey::Id(id),
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyScheme::Code => f.write_str("code"),
            KeyScheme::Id => f.write_str("id"),
        }
    }
}

/// Error returned when parsing an unknown key scheme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key scheme '{0}', expected 'code' or 'id'")]
pub struct ParseKeySchemeError(String);

impl FromStr for KeyScheme {
    type Err = ParseKeySchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" => Ok(KeyScheme::Code),
            "id" => Ok(KeyScheme::Id),
            _ => Err(ParseKeySchemeError(s.to_string())),
        }
    }
}

/// Key of a single URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKey {
    Code(String),
    Id(u64),
}

impl LinkKey {
    /// Raw key bytes as written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            LinkKey::Code(code) => code.as_bytes().to_vec(),
            LinkKey::Id(id) => id.to_be_bytes().to_vec(),
        }
    }
}
