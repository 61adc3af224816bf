//! Full chat page: message plus user-typed context, sent straight to the
//! backend.

use crate::backend::BackendClient;
use crate::error::{CommandError, Result};
use serde_json::Value;
use std::sync::Arc;

use super::display::OutputArea;
use super::{NO_ANSWER, READY, THINKING};

/// The standalone chat page.
pub struct ChatPage {
    output: Arc<dyn OutputArea>,
    backend: BackendClient,
}

impl ChatPage {
    /// Creates a page writing into `output` and talking to `backend`.
    pub fn new(output: Arc<dyn OutputArea>, backend: BackendClient) -> Self {
        Self { output, backend }
    }

    /// Sends `message` with the typed `context` and renders the answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the message is empty or the backend call fails.
    /// Either way the output area already shows what went wrong.
    pub async fn ask(&self, message: &str, context: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            self.output.set_text("Type a message first.");
            return Err(CommandError::MissingArgument("message".to_string()).into());
        }

        self.output.set_text(THINKING);
        match self.backend.send(message, context.trim()).await {
            Ok(answer) => {
                self.output
                    .set_text(if answer.is_empty() { NO_ANSWER } else { answer.as_str() });
                Ok(answer)
            }
            Err(e) => {
                self.output.set_text(&format!("❌ Error:\n{e}"));
                Err(e)
            }
        }
    }

    /// Checks the backend's status route and shows the raw JSON.
    ///
    /// # Errors
    ///
    /// Returns the backend error after rendering it.
    pub async fn ping(&self) -> Result<Value> {
        self.output.set_text("Pinging...");
        match self.backend.status().await {
            Ok(status) => {
                let pretty =
                    serde_json::to_string_pretty(&status).unwrap_or_else(|_| status.to_string());
                self.output.set_text(&format!("✅ Backend OK:\n{pretty}"));
                Ok(status)
            }
            Err(e) => {
                self.output.set_text(&format!("❌ Ping failed:\n{e}"));
                Err(e)
            }
        }
    }

    /// Resets the output area.
    pub fn clear(&self) {
        self.output.set_text(READY);
    }
}
