use crate::config::ApiConfig;
use crate::errors::SearchError;
use crate::models::{MovieRecord, OmdbEnvelope};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Raw access to the movie-information service.
///
/// Implementations perform exactly one request per call and hand back the
/// undecoded body. Classification of the body lives in [`parse_response`].
#[async_trait]
pub trait MovieTransport: Send + Sync {
    async fn fetch(&self, title: &str) -> Result<String, SearchError>;
}

/// HTTP transport for an OMDb-compatible endpoint.
pub struct OmdbTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbTransport {
    pub fn new(config: &ApiConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        // Without an explicit value the transport default applies.
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MovieTransport for OmdbTransport {
    async fn fetch(&self, title: &str) -> Result<String, SearchError> {
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(SearchError::transport)?;

        let status = res.status();
        if !status.is_success() {
            // The body may still be a well-formed envelope, so keep going.
            warn!("Movie service answered with HTTP {}", status);
        }

        res.text().await.map_err(SearchError::transport)
    }
}

/// Rejects titles that are empty once surrounding whitespace is removed.
pub fn validate_title(title: &str) -> Result<(), SearchError> {
    if title.trim().is_empty() {
        Err(SearchError::InvalidInput)
    } else {
        Ok(())
    }
}

/// Classifies a response body into a record or one of the search errors.
pub fn parse_response(body: &str) -> Result<MovieRecord, SearchError> {
    match serde_json::from_str::<OmdbEnvelope>(body) {
        Ok(OmdbEnvelope::Found(record)) => Ok(record),
        Ok(OmdbEnvelope::NotFound { error }) => Err(SearchError::NotFound { reason: error }),
        Err(e) => Err(SearchError::transport(e)),
    }
}

/// Title search over any [`MovieTransport`].
pub struct MovieSearch<T> {
    transport: T,
}

impl<T: MovieTransport> MovieSearch<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Looks up a single movie by title.
    ///
    /// The title is validated on its trimmed form but sent as typed. An
    /// invalid title fails before the transport is touched.
    pub async fn search(&self, title: &str) -> Result<MovieRecord, SearchError> {
        validate_title(title)?;

        debug!("Searching movie service for {:?}", title);
        let body = self.transport.fetch(title).await?;
        let record = parse_response(&body)?;

        info!("Found '{}' ({})", record.title, record.year);
        Ok(record)
    }
}
