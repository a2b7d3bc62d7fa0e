//! DTOs for the link shortening endpoint.

use serde::Deserialize;

/// Form fields accepted by `POST /`.
///
/// The same shape is read from the urlencoded body and from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenForm {
    /// The URL to shorten.
    pub url: Option<String>,
}

impl ShortenForm {
    /// Picks the `url` field from the body, falling back to the query string.
    pub fn merge(body: Option<Self>, query: Option<Self>) -> Option<String> {
        body.and_then(|f| f.url)
            .or_else(|| query.and_then(|f| f.url))
    }
}
