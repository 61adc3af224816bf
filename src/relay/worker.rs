//! Relay actor.
//!
//! The worker receives requests on an `mpsc` mailbox and spawns one task
//! per request, so a slow backend call never delays other requests.
//! Replies travel back on the `oneshot` sender carried by each request.

use crate::core::{Message, RelayResult};
use crate::error::{Error, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::coordinator::Relay;

/// Mailbox capacity for the relay worker.
const MAILBOX_SIZE: usize = 32;

/// A message delivered to the relay worker, with its reply channel.
#[derive(Debug)]
pub struct RelayRequest {
    /// The message.
    pub message: Message,
    /// Where to send the result.
    pub reply: oneshot::Sender<RelayResult>,
}

/// Cloneable handle for sending questions to the relay worker.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<RelayRequest>,
}

impl RelayHandle {
    /// Sends a message and waits for the relay's answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the worker is gone or the
    /// message was not one it answers.
    pub async fn send(&self, message: Message) -> Result<RelayResult> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(RelayRequest { message, reply })
            .await
            .map_err(|_| {
                Error::Disconnected(
                    "Could not establish connection. Receiving end does not exist.".to_string(),
                )
            })?;

        response.await.map_err(|_| {
            Error::Disconnected(
                "The message port closed before a response was received.".to_string(),
            )
        })
    }

    /// Asks a question about the active source.
    ///
    /// # Errors
    ///
    /// See [`RelayHandle::send`].
    pub async fn ask(&self, message: &str, include_page_text: bool) -> Result<RelayResult> {
        self.send(Message::AskAi {
            message: message.to_string(),
            include_page_text,
        })
        .await
    }
}

/// Spawns the relay worker.
///
/// The worker stops once every handle has been dropped; requests already
/// in flight still complete.
#[must_use]
pub fn spawn_relay(relay: Relay) -> RelayHandle {
    let (sender, mut receiver) = mpsc::channel::<RelayRequest>(MAILBOX_SIZE);

    tokio::spawn(async move {
        while let Some(RelayRequest { message, reply }) = receiver.recv().await {
            let relay = relay.clone();
            tokio::spawn(async move {
                if let Some(result) = relay.handle_message(&message).await {
                    // Sender may have stopped waiting.
                    let _ = reply.send(result);
                }
            });
        }
        debug!("relay worker stopped");
    });

    RelayHandle { sender }
}
