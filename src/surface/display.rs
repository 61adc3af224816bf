//! Display handles injected into surfaces.

use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};

/// A single text area a surface writes its state into.
pub trait OutputArea: Send + Sync {
    /// Replaces the area's text.
    fn set_text(&self, text: &str);
}

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The user.
    User,
    /// The assistant.
    Ai,
}

impl Role {
    /// Label used in text output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Ai => "AI",
        }
    }
}

/// An append-only conversation view.
pub trait TranscriptView: Send + Sync {
    /// Appends a message.
    fn add_message(&self, role: Role, text: &str);

    /// Removes every message.
    fn clear(&self);
}

/// In-memory [`OutputArea`] that remembers every state it was put in.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    frames: Arc<Mutex<Vec<String>>>,
}

impl TextBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text (empty if never set).
    #[must_use]
    pub fn text(&self) -> String {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    /// Every text the area has shown, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputArea for TextBuffer {
    fn set_text(&self, text: &str) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}

/// In-memory [`TranscriptView`].
#[derive(Debug, Clone, Default)]
pub struct TranscriptLog {
    messages: Arc<Mutex<Vec<(Role, String)>>>,
}

impl TranscriptLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages.
    #[must_use]
    pub fn messages(&self) -> Vec<(Role, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Renders the log as `You: ...` / `AI: ...` lines.
    #[must_use]
    pub fn render(&self) -> String {
        self.messages()
            .iter()
            .map(|(role, text)| format!("{}: {text}\n", role.label()))
            .collect()
    }
}

impl TranscriptView for TranscriptLog {
    fn add_message(&self, role: Role, text: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((role, text.to_string()));
    }

    fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
