//! Page snapshots and the context extracted from them.

use serde::{Deserialize, Serialize};

/// A document as seen by the context collector.
///
/// Mirrors what a content script can read from a live tab: the location,
/// the document title, the current selection, and the rendered body text.
///
/// # Examples
///
/// ```
/// use pagechat::core::Page;
///
/// let page = Page::new("https://example.com", "Example")
///     .with_selection("hello")
///     .with_body_text("hello world");
/// assert_eq!(page.selection.as_deref(), Some("hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Location of the document.
    #[serde(default)]
    pub url: String,

    /// Document title.
    #[serde(default)]
    pub title: String,

    /// Currently selected text, if any.
    #[serde(default, alias = "selectedText")]
    pub selection: Option<String>,

    /// Visible body text.
    #[serde(default, alias = "bodyText", alias = "text")]
    pub body_text: String,
}

impl Page {
    /// Creates a page with a location and title and no content.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            selection: None,
            body_text: String::new(),
        }
    }

    /// Sets the current selection.
    #[must_use]
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    /// Sets the visible body text.
    #[must_use]
    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = text.into();
        self
    }
}

/// Context gathered from a page for one request.
///
/// Serialized with the field names the extension messages use
/// (`selectedText`, `pageText`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Location of the page.
    #[serde(default)]
    pub url: String,

    /// Page title.
    #[serde(default)]
    pub title: String,

    /// Trimmed selection, empty when nothing is selected.
    #[serde(default)]
    pub selected_text: String,

    /// Trimmed, possibly truncated page text; empty unless requested.
    #[serde(default)]
    pub page_text: String,
}

impl PageContext {
    /// Context carrying only source metadata.
    ///
    /// Used when the collector cannot be reached.
    pub fn metadata_only(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            selected_text: String::new(),
            page_text: String::new(),
        }
    }
}
