//! Pure extraction of context from a page.

use crate::core::{ContextReply, Message, Page, PageContext};
use crate::io::truncate_with_marker;

/// Appended to page text that was cut at the limit.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

/// Current selection, trimmed; empty when nothing is selected.
#[must_use]
pub fn selected_text(page: &Page) -> String {
    page.selection
        .as_deref()
        .map_or_else(String::new, |s| s.trim().to_string())
}

/// Visible page text, trimmed and bounded to `max_chars` characters.
///
/// Text longer than the limit is cut to exactly `max_chars` characters
/// followed by [`TRUNCATION_MARKER`].
///
/// # Examples
///
/// ```
/// use pagechat::collector::{TRUNCATION_MARKER, page_text};
/// use pagechat::core::Page;
///
/// let page = Page::default().with_body_text("  abcdef  ");
/// assert_eq!(page_text(&page, 10), "abcdef");
/// assert_eq!(page_text(&page, 3), format!("abc{TRUNCATION_MARKER}"));
/// ```
#[must_use]
pub fn page_text(page: &Page, max_chars: usize) -> String {
    let text = page.body_text.trim();
    if text.is_empty() {
        return String::new();
    }
    truncate_with_marker(text, max_chars, TRUNCATION_MARKER)
}

/// Collects the context for one request.
///
/// `page_text` is only filled when `include_page_text` is set.
#[must_use]
pub fn collect(page: &Page, include_page_text: bool, max_chars: usize) -> PageContext {
    PageContext {
        url: page.url.clone(),
        title: page.title.clone(),
        selected_text: selected_text(page),
        page_text: if include_page_text {
            page_text(page, max_chars)
        } else {
            String::new()
        },
    }
}

/// Answers a message addressed to the collector.
///
/// Only `GET_CONTEXT` gets a reply; every other message returns `None`.
#[must_use]
pub fn handle_message(page: &Page, message: &Message, max_chars: usize) -> Option<ContextReply> {
    match message {
        Message::GetContext { include_page_text } => Some(ContextReply::new(collect(
            page,
            *include_page_text,
            max_chars,
        ))),
        Message::AskAi { .. } | Message::Other => None,
    }
}
