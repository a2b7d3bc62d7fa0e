//! Application configuration from command-line flags and environment variables.
//!
//! Every flag has an environment fallback; `.env` is loaded by `main.rs`
//! before parsing. Flags win over environment variables.
//!
//! ```bash
//! magcargo --port 9000 --salt "this is my salt" --db /var/lib/magcargo.db
//!
//! # or
//! export MAGCARGO_PORT=9000
//! export MAGCARGO_SALT="this is my salt"
//! magcargo
//! ```
//!
//! ## Variables
//!
//! - `MAGCARGO_HOST` - Interface to bind (default: all interfaces, IPv6 and IPv4)
//! - `MAGCARGO_PORT` - Port to listen on (default: `8080`)
//! - `MAGCARGO_SALT` - Short code salt (default: random, logged at startup)
//! - `MAGCARGO_DB` - Database file (default: `magcargo.db`)
//! - `MAGCARGO_MIN_LENGTH` - Minimum short code length (default: `5`)
//! - `MAGCARGO_ALPHABET` - Short code alphabet (default: letters and digits)
//! - `MAGCARGO_NAMESPACE` - Store namespace (default: the salt)
//! - `MAGCARGO_KEY_SCHEME` - `code` or `id` (default: `code`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! A generated salt is only valid for the life of the process. Restarting
//! without `--salt` starts a fresh namespace and old codes stop resolving.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

use crate::domain::entities::KeyScheme;
use crate::utils::salt::generate_salt;
use crate::utils::short_code::{CodecError, MAX_MIN_LENGTH, ShortCodeCodec};

/// Service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "magcargo", author, version, about, long_about = None)]
pub struct Config {
    /// Host or address to bind; empty binds all interfaces.
    #[arg(long, env = "MAGCARGO_HOST", default_value = "")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "MAGCARGO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Salt for short code generation; random when omitted.
    #[arg(long, env = "MAGCARGO_SALT", hide_env_values = true)]
    pub salt: Option<String>,

    /// Path to the database file.
    #[arg(long, env = "MAGCARGO_DB", default_value = "magcargo.db")]
    pub db: PathBuf,

    /// Minimum length of generated short codes.
    #[arg(long = "minlength", env = "MAGCARGO_MIN_LENGTH", default_value_t = 5)]
    pub min_length: usize,

    /// Alphabet for short codes.
    #[arg(long, env = "MAGCARGO_ALPHABET")]
    pub alphabet: Option<String>,

    /// Store namespace; defaults to the salt.
    #[arg(long, env = "MAGCARGO_NAMESPACE")]
    pub namespace: Option<String>,

    /// Record key scheme: `code` or `id`.
    #[arg(long, env = "MAGCARGO_KEY_SCHEME", default_value_t = KeyScheme::Code)]
    pub key_scheme: KeyScheme,

    /// Log filter directive.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format: `text` or `json`.
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `port` is 0
    /// - `min_length` exceeds the encoder limit
    /// - `log_format` is not `text` or `json`
    /// - `namespace` is set but blank
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("MAGCARGO_PORT must be between 1 and 65535");
        }

        if self.min_length > MAX_MIN_LENGTH {
            bail!(
                "MAGCARGO_MIN_LENGTH must be at most {}, got {}",
                MAX_MIN_LENGTH,
                self.min_length
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if let Some(ref namespace) = self.namespace
            && namespace.trim().is_empty()
        {
            bail!("MAGCARGO_NAMESPACE must not be blank");
        }

        Ok(())
    }

    /// Preferred socket address string to bind.
    ///
    /// An empty host means all interfaces and prefers the dual-stack IPv6
    /// wildcard. Bare IPv6 literals are bracketed.
    pub fn listen_addr(&self) -> String {
        let host = self.host.trim();

        if host.is_empty() {
            format!("[::]:{}", self.port)
        } else if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// Addresses to try in order when binding.
    ///
    /// An empty host falls back to the IPv4 wildcard on systems without IPv6.
    pub fn listen_addrs(&self) -> Vec<String> {
        let mut addrs = vec![self.listen_addr()];
        if self.host.trim().is_empty() {
            addrs.push(format!("0.0.0.0:{}", self.port));
        }
        addrs
    }

    /// Returns the configured salt, generating a random one when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the system random number generator fails.
    pub fn resolve_salt(&self) -> Result<String> {
        match self.salt {
            Some(ref salt) => Ok(salt.clone()),
            None => {
                let salt = generate_salt()?;
                tracing::info!(salt = %salt, "No salt configured, generated one");
                Ok(salt)
            }
        }
    }

    /// Store namespace for the given salt.
    pub fn namespace_for(&self, salt: &str) -> String {
        self.namespace.clone().unwrap_or_else(|| salt.to_string())
    }

    /// Builds the short code codec for the given salt.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Config`] if the alphabet or minimum length is
    /// unusable.
    pub fn codec(&self, salt: &str) -> Result<ShortCodeCodec, CodecError> {
        match self.alphabet {
            Some(ref alphabet) => ShortCodeCodec::with_alphabet(alphabet, salt, self.min_length),
            None => ShortCodeCodec::new(salt, self.min_length),
        }
    }

    /// Prints configuration summary (without the salt).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  Database: {}", self.db.display());
        tracing::info!(
            "  Salt: {}",
            if self.salt.is_some() { "configured" } else { "generated" }
        );
        tracing::info!("  Min length: {}", self.min_length);
        tracing::info!(
            "  Alphabet: {}",
            if self.alphabet.is_some() { "custom" } else { "default" }
        );
        match self.namespace {
            Some(ref namespace) => tracing::info!("  Namespace: {}", namespace),
            None => tracing::info!("  Namespace: (salt)"),
        }
        tracing::info!("  Key scheme: {}", self.key_scheme);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}
