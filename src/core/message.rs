//! Messages exchanged between the popup, relay, and context collector.
//!
//! Every actor sees the same message type and answers only the variant it
//! owns: the collector answers `GET_CONTEXT`, the relay answers `ASK_AI`.

use serde::{Deserialize, Serialize};

use super::page::PageContext;

/// A request sent between actors, tagged by `type` on the wire.
///
/// # Examples
///
/// ```
/// use pagechat::core::Message;
///
/// let msg: Message =
///     serde_json::from_str(r#"{"type":"GET_CONTEXT","includePageText":true}"#).unwrap();
/// assert_eq!(msg, Message::GetContext { include_page_text: true });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Ask the collector for the page context.
    #[serde(rename = "GET_CONTEXT", rename_all = "camelCase")]
    GetContext {
        /// Whether to include the visible page text.
        #[serde(default)]
        include_page_text: bool,
    },

    /// Ask the relay to answer a question about the active page.
    #[serde(rename = "ASK_AI", rename_all = "camelCase")]
    AskAi {
        /// The user's question.
        message: String,
        /// Whether to include the visible page text.
        #[serde(default)]
        include_page_text: bool,
    },

    /// Any other message type; every actor ignores it.
    #[serde(other)]
    Other,
}

impl Message {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::GetContext { .. } => "GET_CONTEXT",
            Self::AskAi { .. } => "ASK_AI",
            Self::Other => "OTHER",
        }
    }
}

/// The collector's answer to `GET_CONTEXT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextReply {
    /// Always true when the collector answers.
    pub ok: bool,

    /// The collected context.
    #[serde(flatten)]
    pub context: PageContext,
}

impl ContextReply {
    /// Wraps collected context in a successful reply.
    #[must_use]
    pub const fn new(context: PageContext) -> Self {
        Self { ok: true, context }
    }
}
