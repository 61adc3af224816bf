//! Running conversation view backed by the backend's own history.

use crate::backend::BackendClient;
use crate::core::Analytics;
use crate::error::{CommandError, Result};
use std::fmt::Write;
use std::sync::Arc;
use tracing::warn;

use super::display::{Role, TranscriptView};

/// Shown after the backend's conversation state is cleared.
pub const CLEARED: &str = "Context has been cleared. Starting fresh!";

/// The full web chat: history replay, messages, reset, analytics.
pub struct Transcript {
    view: Arc<dyn TranscriptView>,
    backend: BackendClient,
}

impl Transcript {
    /// Creates a transcript rendering into `view`.
    pub fn new(view: Arc<dyn TranscriptView>, backend: BackendClient) -> Self {
        Self { view, backend }
    }

    /// Replays prior exchanges from the backend.
    ///
    /// Failures are logged and leave the view untouched. Returns the number
    /// of exchanges replayed.
    pub async fn load_history(&self) -> usize {
        match self.backend.history().await {
            Ok(history) => {
                for exchange in &history.history {
                    self.view.add_message(Role::User, &exchange.user);
                    self.view.add_message(Role::Ai, &exchange.ai);
                }
                history.history.len()
            }
            Err(e) => {
                warn!(error = %e, "could not load history");
                0
            }
        }
    }

    /// Sends a message and appends both sides of the exchange.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty message or a failed backend call; the
    /// failure is also appended to the view.
    pub async fn send(&self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CommandError::MissingArgument("message".to_string()).into());
        }

        self.view.add_message(Role::User, message);
        match self.backend.send(message, "").await {
            Ok(answer) => {
                self.view.add_message(Role::Ai, &answer);
                Ok(answer)
            }
            Err(e) if e.is_transport() => {
                self.view
                    .add_message(Role::Ai, "Connection error. Please try again.");
                Err(e)
            }
            Err(e) => {
                self.view.add_message(Role::Ai, &format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Clears the backend conversation and the view.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the view is left as it was.
    pub async fn reset(&self) -> Result<()> {
        self.backend.reset().await?;
        self.view.clear();
        self.view.add_message(Role::Ai, CLEARED);
        Ok(())
    }

    /// Fetches analytics and renders them as text.
    pub async fn analytics(&self) -> String {
        match self.backend.analytics().await {
            Ok(analytics) => format_analytics(&analytics),
            Err(e) => {
                warn!(error = %e, "could not load analytics");
                "Error loading analytics".to_string()
            }
        }
    }
}

/// Renders analytics as a short text summary.
#[must_use]
pub fn format_analytics(analytics: &Analytics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total Exchanges:  {}", analytics.total_exchanges);
    let _ = writeln!(output, "Memories Learned: {}", analytics.memories_learned);

    if let (Some(score), Some(label)) = (analytics.sentiment, analytics.sentiment_label()) {
        let _ = writeln!(output, "Sentiment:        {label} ({score:.2})");
    }

    if let Some(topics) = analytics.top_topics.as_deref().filter(|t| !t.is_empty()) {
        output.push_str("Top Topics:\n");
        for topic in topics {
            let _ = writeln!(output, "  {}: {} mentions", topic.topic, topic.count);
        }
    }

    output
}
