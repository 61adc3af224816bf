//! Relay coordinator.

use crate::backend::ChatBackend;
use crate::core::{Message, PageContext, RelayResult};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::context::build_context_string;
use super::source::{Source, SourceProvider};

/// Coordinates one question: source, context, backend, result.
///
/// Holds no per-request state, so clones can serve concurrent relays.
#[derive(Clone)]
pub struct Relay {
    sources: Arc<dyn SourceProvider>,
    backend: Arc<dyn ChatBackend>,
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay").finish_non_exhaustive()
    }
}

impl Relay {
    /// Creates a relay over a source provider and a backend.
    pub fn new(sources: Arc<dyn SourceProvider>, backend: Arc<dyn ChatBackend>) -> Self {
        Self { sources, backend }
    }

    /// Answers `message` about the active source.
    ///
    /// Never fails: backend and source errors become a failed
    /// [`RelayResult`], and context collection errors are replaced by the
    /// source's metadata.
    pub async fn relay(&self, message: &str, include_page_text: bool) -> RelayResult {
        match self.try_relay(message, include_page_text).await {
            Ok(answer) => RelayResult::success(answer),
            Err(e) => {
                warn!(error = %e, "relay failed");
                RelayResult::failure(e.to_string())
            }
        }
    }

    /// Answers an `ASK_AI` message; every other message is ignored.
    pub async fn handle_message(&self, message: &Message) -> Option<RelayResult> {
        match message {
            Message::AskAi {
                message,
                include_page_text,
            } => Some(self.relay(message, *include_page_text).await),
            Message::GetContext { .. } | Message::Other => {
                debug!(kind = message.kind(), "relay ignored message");
                None
            }
        }
    }

    async fn try_relay(&self, message: &str, include_page_text: bool) -> Result<String> {
        debug!(message_len = message.len(), include_page_text, "ASK_AI received");

        let source = self
            .sources
            .active_source()
            .await
            .ok_or(Error::NoActiveSource)?;
        info!(source = source.id, url = %source.url, "active source");

        let ctx = page_context(&source, include_page_text).await;
        let context = build_context_string(&ctx);

        self.backend.send(message, &context).await
    }
}

/// Asks the source's collector for context, falling back to metadata.
async fn page_context(source: &Source, include_page_text: bool) -> PageContext {
    let collected = match &source.collector {
        Some(collector) => collector
            .get_context(include_page_text)
            .await
            .map(|reply| reply.context),
        None => Err(Error::ContextUnavailable {
            reason: "no collector attached to source".to_string(),
        }),
    };

    match collected {
        Ok(ctx) => {
            debug!(
                title = %ctx.title,
                has_selected = !ctx.selected_text.is_empty(),
                page_text_len = ctx.page_text.len(),
                "got context"
            );
            ctx
        }
        Err(e) => {
            warn!(error = %e, "could not get page context, using source metadata");
            source.fallback_context()
        }
    }
}
