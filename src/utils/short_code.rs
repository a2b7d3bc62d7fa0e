//! Reversible short code encoding.
//!
//! Wraps the Hashids scheme from the `harsh` crate: a salted, deterministic
//! mapping from lists of non-negative integers to short URL-safe strings, and
//! back. It obfuscates sequential ids so that issued codes do not look
//! sequential; it is not a cryptographic primitive.
//!
//! # Examples
//!
//! ```
//! use magcargo::utils::short_code::ShortCodeCodec;
//!
//! let codec = ShortCodeCodec::new("this is my salt", 0).unwrap();
//! assert_eq!(codec.encode(&[12345]).unwrap(), "NkK9");
//! assert_eq!(codec.decode("NkK9").unwrap(), vec![12345]);
//! ```

use harsh::Harsh;
use std::fmt;

/// Alphabet used when none is configured.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Largest supported minimum code length.
pub const MAX_MIN_LENGTH: usize = 255;

const MIN_ALPHABET_LENGTH: usize = 16;

/// Longest unpadded single-id code any accepted alphabet can produce.
const MAX_SINGLE_ID_CODE_LENGTH: usize = 32;

/// Errors produced while configuring the codec or converting codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The alphabet or length settings cannot produce a usable codec.
    #[error("invalid short code configuration: {0}")]
    Config(String),

    /// There was nothing to encode.
    #[error("cannot encode an empty id list")]
    Encode,

    /// The input was not produced by this codec configuration.
    #[error("malformed short code: {0}")]
    Decode(&'static str),
}

/// Salted Hashids encoder/decoder.
///
/// Immutable after construction, so a codec can be shared freely between
/// threads.
pub struct ShortCodeCodec {
    harsh: Harsh,
    min_length: usize,
    alphabet_len: usize,
}

impl ShortCodeCodec {
    /// Creates a codec over [`DEFAULT_ALPHABET`].
    ///
    /// An empty salt is accepted; codes are still deterministic but trivially
    /// predictable.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if `min_length` exceeds [`MAX_MIN_LENGTH`].
    pub fn new(salt: &str, min_length: usize) -> Result<Self, CodecError> {
        Self::with_alphabet(DEFAULT_ALPHABET, salt, min_length)
    }

    /// Creates a codec over a custom alphabet.
    ///
    /// Duplicate characters in `alphabet` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if:
    /// - the alphabet has fewer than 16 unique characters
    /// - the alphabet contains whitespace or non-ASCII characters
    /// - `min_length` exceeds [`MAX_MIN_LENGTH`]
    pub fn with_alphabet(alphabet: &str, salt: &str, min_length: usize) -> Result<Self, CodecError> {
        if min_length > MAX_MIN_LENGTH {
            return Err(CodecError::Config(format!(
                "minimum length must be at most {MAX_MIN_LENGTH}, got {min_length}"
            )));
        }

        if !alphabet.is_ascii() {
            return Err(CodecError::Config(
                "alphabet must contain only ASCII characters".to_string(),
            ));
        }

        let mut unique = String::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !unique.contains(c) {
                unique.push(c);
            }
        }

        if unique.len() < MIN_ALPHABET_LENGTH {
            return Err(CodecError::Config(format!(
                "alphabet must contain at least {MIN_ALPHABET_LENGTH} unique characters, got {}",
                unique.len()
            )));
        }

        if unique.chars().any(char::is_whitespace) {
            return Err(CodecError::Config(
                "alphabet must not contain whitespace".to_string(),
            ));
        }

        let alphabet_len = unique.len();
        let harsh = Harsh::builder()
            .salt(salt)
            .length(min_length)
            .alphabet(unique)
            .build()
            .map_err(|e| CodecError::Config(e.to_string()))?;

        Ok(Self {
            harsh,
            min_length,
            alphabet_len,
        })
    }

    /// Minimum number of characters in every produced code.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Encodes a list of ids into a single code.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if `ids` is empty.
    pub fn encode(&self, ids: &[u64]) -> Result<String, CodecError> {
        if ids.is_empty() {
            return Err(CodecError::Encode);
        }

        Ok(self.harsh.encode(ids))
    }

    /// Encodes a single id.
    pub fn encode_id(&self, id: u64) -> String {
        self.harsh.encode(&[id])
    }

    /// Decodes a code back into the ids it was built from.
    ///
    /// The result is re-encoded and compared against the input, so codes
    /// produced under a different salt, alphabet or minimum length are
    /// rejected rather than silently mapped to some other id.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if the code is empty, cannot be decoded
    /// with this alphabet, or does not round-trip.
    pub fn decode(&self, code: &str) -> Result<Vec<u64>, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Decode("empty code"));
        }

        let ids = self
            .harsh
            .decode(code)
            .map_err(|_| CodecError::Decode("not a code for this alphabet"))?;

        if ids.is_empty() || self.harsh.encode(&ids) != code {
            return Err(CodecError::Decode("code does not match this configuration"));
        }

        Ok(ids)
    }

    /// Decodes a code that must hold exactly one id.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if decoding fails or yields a number of
    /// ids other than one.
    pub fn decode_id(&self, code: &str) -> Result<u64, CodecError> {
        if code.len() > self.min_length.max(MAX_SINGLE_ID_CODE_LENGTH) {
            return Err(CodecError::Decode("code too long for a single id"));
        }

        match self.decode(code)?.as_slice() {
            [id] => Ok(*id),
            _ => Err(CodecError::Decode("expected a single id")),
        }
    }
}

impl fmt::Debug for ShortCodeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortCodeCodec")
            .field("salt", &"***")
            .field("min_length", &self.min_length)
            .field("alphabet_len", &self.alphabet_len)
            .finish()
    }
}
