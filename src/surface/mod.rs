//! Presentation surfaces.
//!
//! Each surface is handed the display it writes to when it is built; no
//! surface looks anything up globally. The popup goes through the relay,
//! the chat page calls the backend directly with user-typed context, and
//! the transcript replays and extends the backend's conversation.

pub mod chat_page;
pub mod display;
pub mod popup;
pub mod transcript;

pub use chat_page::ChatPage;
pub use display::{OutputArea, Role, TextBuffer, TranscriptLog, TranscriptView};
pub use popup::Popup;
pub use transcript::{CLEARED, Transcript, format_analytics};

/// Shown by the popup and chat page after a reset.
pub const READY: &str = "Ready.";

/// Shown while a request is in flight.
pub const THINKING: &str = "Thinking...";

/// Shown when the backend answered with empty text.
pub const NO_ANSWER: &str = "(No answer returned)";
