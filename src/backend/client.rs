//! HTTP client for the chat backend.

use crate::config::ClientConfig;
use crate::core::{Analytics, ChatRequest, ChatResponse, History};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, info, warn};

use super::ChatBackend;

/// Client for the chat backend's HTTP API.
///
/// Every call is a single request bounded by the configured timeout. When
/// the timeout fires the in-flight request is dropped and
/// [`Error::Timeout`] is returned. Nothing is retried.
///
/// # Examples
///
/// ```no_run
/// use pagechat::{BackendClient, ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
///
/// # async fn demo() -> pagechat::Result<()> {
/// let client = BackendClient::new(ClientConfig::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS)?)?;
/// let answer = client.send("What is this page about?", "Title: Rust").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl BackendClient {
    /// Creates a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pagechat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Sends a message and its context to the chat endpoint.
    ///
    /// # Errors
    ///
    /// - [`Error::Timeout`] if no answer arrives in time.
    /// - [`Error::Connection`] if the backend cannot be reached.
    /// - [`Error::NonJson`] if the body is not JSON, whatever the status.
    /// - [`Error::Backend`] on a non-2xx status or `success: false`.
    pub async fn send(&self, message: &str, context: &str) -> Result<String> {
        let request = ChatRequest::new(message, context);
        let endpoint = self.config.endpoint.clone();
        debug!(
            %endpoint,
            message_len = message.len(),
            context_len = context.len(),
            "calling backend"
        );

        let (status, body) = self
            .guarded(async move {
                let response = self.http.post(endpoint).json(&request).send().await?;
                let status = response.status();
                let body = response.text().await?;
                Ok((status, body))
            })
            .await
            .inspect_err(|e| warn!(error = %e, "backend call failed"))?;

        let value = parse_json(body)?;
        let parsed = ChatResponse::from_value(&value);

        if !status.is_success() || parsed.is_failure() {
            let message = parsed
                .error_message()
                .map_or_else(|| status_message(status), str::to_string);
            warn!(status = status.as_u16(), error = %message, "backend reported failure");
            return Err(Error::backend(message));
        }

        info!(status = status.as_u16(), "backend answered");
        Ok(parsed.response.unwrap_or_default())
    }

    /// Fetches `/api/status` and returns the raw JSON.
    ///
    /// Any JSON body is returned as-is, whatever the HTTP status; a degraded
    /// backend usually says so in the body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonJson`] for a non-JSON body, [`Error::Timeout`], or
    /// a transport error.
    pub async fn status(&self) -> Result<Value> {
        let url = self.config.route("api/status")?;
        debug!(%url, "checking status");

        let (status, body) = self.fetch(url).await?;
        let value = parse_json(body)?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "status route answered with an error code");
        }
        Ok(value)
    }

    /// Fetches the backend's conversation history.
    ///
    /// # Errors
    ///
    /// Same classification as [`BackendClient::send`].
    pub async fn history(&self) -> Result<History> {
        self.get_json("api/history").await
    }

    /// Fetches conversation analytics.
    ///
    /// # Errors
    ///
    /// Same classification as [`BackendClient::send`].
    pub async fn analytics(&self) -> Result<Analytics> {
        self.get_json("api/analytics").await
    }

    /// Clears the backend's conversation state.
    ///
    /// Sends a bodiless POST; only the status code is inspected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] on a non-2xx status, or a transport error.
    pub async fn reset(&self) -> Result<()> {
        let url = self.config.route("api/reset")?;
        debug!(%url, "resetting conversation");

        let status = self
            .guarded(async move {
                let response = self.http.post(url).send().await?;
                Ok(response.status())
            })
            .await?;

        if status.is_success() {
            Ok(())
        } else {
            Err(Error::backend(status_message(status)))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        let url = self.config.route(route)?;
        debug!(%url, "fetching");

        let (status, body) = self.fetch(url).await?;
        let value = parse_json(body)?;

        if !status.is_success() {
            let parsed = ChatResponse::from_value(&value);
            return Err(Error::backend(
                parsed
                    .error_message()
                    .map_or_else(|| status_message(status), str::to_string),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::backend(format!("unexpected {route} payload: {e}")))
    }

    async fn fetch(&self, url: Url) -> Result<(StatusCode, String)> {
        self.guarded(async move {
            let response = self.http.get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok((status, body))
        })
        .await
    }

    /// Runs `call` under the configured timeout.
    async fn guarded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        let after = self.config.timeout;
        tokio::time::timeout(after, call)
            .await
            .map_err(|_| Error::Timeout { after })?
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn send(&self, message: &str, context: &str) -> Result<String> {
        Self::send(self, message, context).await
    }
}

fn parse_json(body: String) -> Result<Value> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::NonJson { body }),
    }
}

fn status_message(status: StatusCode) -> String {
    format!("Backend error (HTTP {})", status.as_u16())
}
