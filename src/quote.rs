use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const FALLBACK_QUOTE: &str = "Stay motivated!";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Quote service returned no quotes")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    q: String,
    a: String,
}

#[derive(Clone)]
pub struct QuoteClient {
    client: reqwest::Client,
    url: Arc<Url>,
}

impl QuoteClient {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: Arc::new(url),
        }
    }

    /// A formatted quote, or [`FALLBACK_QUOTE`] if the service is unavailable.
    pub async fn fetch(&self) -> String {
        self.fetch_quote().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to fetch quote");
            FALLBACK_QUOTE.to_string()
        })
    }

    async fn fetch_quote(&self) -> Result<String, QuoteError> {
        let quotes: Vec<RawQuote> = self
            .client
            .get(self.url.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let quote = quotes.into_iter().next().ok_or(QuoteError::Empty)?;
        Ok(format!("\"{}\" - {}", quote.q, quote.a))
    }
}
