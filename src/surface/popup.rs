//! Popup surface: asks the relay about the active page.

use crate::core::RelayResult;
use crate::error::{CommandError, Result};
use crate::relay::RelayHandle;
use std::sync::Arc;

use super::display::OutputArea;
use super::{NO_ANSWER, READY, THINKING};

/// The extension popup.
pub struct Popup {
    output: Arc<dyn OutputArea>,
    relay: RelayHandle,
}

impl Popup {
    /// Creates a popup writing into `output` and asking `relay`.
    pub fn new(output: Arc<dyn OutputArea>, relay: RelayHandle) -> Self {
        Self { output, relay }
    }

    /// Asks `question` about the active page and renders the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the question is empty or the relay cannot be
    /// reached. A relay that answers with a failure is not an error here;
    /// inspect [`RelayResult::ok`].
    pub async fn ask(&self, question: &str, include_page_text: bool) -> Result<RelayResult> {
        let message = question.trim();
        if message.is_empty() {
            self.output.set_text("Type a question first.");
            return Err(CommandError::MissingArgument("question".to_string()).into());
        }

        self.output.set_text(THINKING);

        let result = match self.relay.ask(message, include_page_text).await {
            Ok(result) => result,
            Err(e) => {
                self.output.set_text(&format!("Extension error: {e}"));
                return Err(e);
            }
        };

        if result.ok {
            let answer = result.answer.as_deref().unwrap_or_default();
            self.output
                .set_text(if answer.is_empty() { NO_ANSWER } else { answer });
        } else {
            let error = result
                .error
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or("Unknown error");
            self.output.set_text(&format!("Error: {error}"));
        }

        Ok(result)
    }

    /// Resets the output area.
    pub fn clear(&self) {
        self.output.set_text(READY);
    }
}
