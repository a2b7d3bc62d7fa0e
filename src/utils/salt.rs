//! Random salt generation.

use anyhow::{Result, anyhow};
use base64::Engine as _;

/// Number of random bytes in a generated salt.
const SALT_LENGTH_BYTES: usize = 12;

/// Generates a random salt for the short code encoder.
///
/// Uses `getrandom` for entropy and encodes the result as standard base64,
/// producing a 16-character string.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
pub fn generate_salt() -> Result<String> {
    let mut buffer = [0u8; SALT_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| anyhow!("Failed to generate random salt: {e}"))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(buffer))
}
