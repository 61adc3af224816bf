//! Client configuration.
//!
//! Defaults match a backend running locally on port 5000. The CLI layers
//! flag and environment overrides on top through [`ClientConfig::new`].

use crate::error::{Error, Result};
use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;
use std::time::Duration;

/// Default chat endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/chat";

/// Default backend timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default maximum page text length, in characters.
pub const DEFAULT_MAX_PAGE_CHARS: usize = 8000;

/// Matches the chat path at the end of an endpoint, ignoring case and
/// trailing whitespace.
static CHAT_SUFFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)/api/chat/?\s*$").ok());

/// Settings shared by every backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Chat endpoint URL.
    pub endpoint: Url,

    /// Per-call timeout.
    pub timeout: Duration,

    /// Page text limit for the context collector.
    pub max_page_chars: usize,
}

impl ClientConfig {
    /// Builds a configuration from an endpoint string and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not an absolute
    /// `http`/`https` URL or the timeout is zero.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        if timeout_secs == 0 {
            return Err(Error::Config {
                message: "timeout must be at least 1 second".to_string(),
            });
        }
        Ok(Self {
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
            max_page_chars: DEFAULT_MAX_PAGE_CHARS,
        })
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the page text limit.
    #[must_use]
    pub const fn with_max_page_chars(mut self, max: usize) -> Self {
        self.max_page_chars = max;
        self
    }

    /// Base URL of the backend, used for the status/history/reset/analytics
    /// routes.
    ///
    /// Strips a trailing `/api/chat` from the endpoint. Endpoints without
    /// that suffix fall back to their origin.
    #[must_use]
    pub fn base_url(&self) -> Url {
        let raw = self.endpoint.as_str();
        if let Some(re) = CHAT_SUFFIX.as_ref()
            && let Some(m) = re.find(raw)
            && let Ok(mut base) = Url::parse(&raw[..m.start()])
        {
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            return base;
        }

        let mut origin = self.endpoint.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        origin
    }

    /// Resolves an `/api/...` route against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the route cannot be joined.
    pub fn route(&self, route: &str) -> Result<Url> {
        self.base_url()
            .join(route.trim_start_matches('/'))
            .map_err(|e| Error::Config {
                message: format!("invalid route {route}: {e}"),
            })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim()).map_err(|e| Error::Config {
        message: format!("invalid endpoint {endpoint:?}: {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config {
            message: format!("unsupported endpoint scheme: {other}"),
        }),
    }
}
