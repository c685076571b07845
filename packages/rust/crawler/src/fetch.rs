//! HTTP page fetching.

use std::future::Future;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use syllabi_shared::{FetchConfig, Result, SyllabiError};

/// User-Agent string for page requests.
const USER_AGENT: &str = concat!("Syllabi/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Source of raw HTML documents.
pub trait PageFetcher {
    /// Fetch `url` and return its body. An empty body is an error: there is
    /// nothing to extract from it.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// [`PageFetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);

        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| SyllabiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = Url::parse(url)
            .map_err(|e| SyllabiError::validation(format!("invalid URL {url:?}: {e}")))?;

        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| SyllabiError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyllabiError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyllabiError::Network(format!("{url}: body read failed: {e}")))?;

        if body.trim().is_empty() {
            return Err(SyllabiError::parse(format!("{url}: empty document")));
        }

        debug!(%url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
