//! Backend access.
//!
//! [`ChatBackend`] is the seam the relay depends on; [`BackendClient`] is
//! the HTTP implementation, which also exposes the status, history, reset,
//! and analytics routes used by the surfaces.

pub mod client;

pub use client::BackendClient;

use crate::error::Result;
use async_trait::async_trait;

/// Something that can answer a chat message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one message with its context and returns the answer text.
    ///
    /// Implementations make exactly one attempt; failures are returned to
    /// the caller unchanged.
    async fn send(&self, message: &str, context: &str) -> Result<String>;
}
