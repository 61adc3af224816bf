//! Collector actor.
//!
//! A spawned task owns the page and answers requests arriving on an `mpsc`
//! channel. Each request carries a `oneshot` sender for the reply; requests
//! the collector does not handle get their sender dropped, which the caller
//! observes as "no response".

use crate::core::{ContextReply, Message, Page};
use crate::error::{Error, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::extract::handle_message;

/// Mailbox capacity for a collector.
const MAILBOX_SIZE: usize = 16;

/// Reply channel for a collector request.
pub type ReplySender = oneshot::Sender<ContextReply>;

/// A message delivered to a collector, with its reply channel.
#[derive(Debug)]
pub struct CollectorRequest {
    /// The message.
    pub message: Message,
    /// Where to send the answer.
    pub reply: ReplySender,
}

/// Cloneable handle for talking to a collector.
#[derive(Debug, Clone)]
pub struct CollectorHandle {
    sender: mpsc::Sender<CollectorRequest>,
}

impl CollectorHandle {
    /// Creates a handle and the receiving end of its mailbox.
    ///
    /// Useful for collectors that are not backed by a [`Page`].
    #[must_use]
    pub fn channel() -> (Self, mpsc::Receiver<CollectorRequest>) {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        (Self { sender }, receiver)
    }

    /// Sends a message and waits for the reply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContextUnavailable`] if the collector is gone or
    /// drops the request without answering.
    pub async fn request(&self, message: Message) -> Result<ContextReply> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(CollectorRequest { message, reply })
            .await
            .map_err(|_| Error::ContextUnavailable {
                reason: "Could not establish connection. Receiving end does not exist."
                    .to_string(),
            })?;

        response.await.map_err(|_| Error::ContextUnavailable {
            reason: "No response from content script".to_string(),
        })
    }

    /// Requests the page context.
    ///
    /// # Errors
    ///
    /// See [`CollectorHandle::request`].
    pub async fn get_context(&self, include_page_text: bool) -> Result<ContextReply> {
        self.request(Message::GetContext { include_page_text }).await
    }
}

/// Spawns a collector task serving `page`.
///
/// The task ends once every handle has been dropped.
#[must_use]
pub fn spawn_collector(page: Page, max_chars: usize) -> CollectorHandle {
    let (handle, mut receiver) = CollectorHandle::channel();

    tokio::spawn(async move {
        while let Some(CollectorRequest { message, reply }) = receiver.recv().await {
            match handle_message(&page, &message, max_chars) {
                Some(answer) => {
                    debug!(
                        title = %answer.context.title,
                        page_text_len = answer.context.page_text.len(),
                        "collector answered"
                    );
                    // Caller may have given up; nothing to do.
                    let _ = reply.send(answer);
                }
                None => debug!(kind = message.kind(), "collector ignored message"),
            }
        }
    });

    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawned_collector_answers() {
        let page = Page::new("u", "T").with_selection("foo").with_body_text("body");
        let handle = spawn_collector(page, 8000);

        let reply = handle.get_context(true).await.unwrap();
        assert!(reply.ok);
        assert_eq!(reply.context.selected_text, "foo");
        assert_eq!(reply.context.page_text, "body");

        let reply = handle.get_context(false).await.unwrap();
        assert_eq!(reply.context.page_text, "");
    }

    #[tokio::test]
    async fn test_ignored_message_is_no_response() {
        let handle = spawn_collector(Page::default(), 8000);
        let err = handle
            .request(Message::AskAi {
                message: "hi".to_string(),
                include_page_text: false,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No response from content script"));
    }

    #[tokio::test]
    async fn test_closed_collector_is_unavailable() {
        let (handle, receiver) = CollectorHandle::channel();
        drop(receiver);

        let err = handle.get_context(false).await.unwrap_err();
        assert!(matches!(err, Error::ContextUnavailable { .. }));
    }
}
