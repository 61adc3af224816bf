//! Context string assembly.

use crate::core::PageContext;

/// Builds the context string sent to the backend.
///
/// Non-empty parts are joined with newlines in this order: title, URL,
/// then either the selection or the page text. A selection always wins
/// over page text; both are never sent.
///
/// # Examples
///
/// ```
/// use pagechat::core::PageContext;
/// use pagechat::relay::build_context_string;
///
/// let ctx = PageContext {
///     url: "u".to_string(),
///     title: "T".to_string(),
///     selected_text: "foo".to_string(),
///     page_text: String::new(),
/// };
/// assert_eq!(build_context_string(&ctx), "Title: T\nURL: u\n\nSelected Text:\nfoo");
/// ```
#[must_use]
pub fn build_context_string(ctx: &PageContext) -> String {
    let mut parts = Vec::with_capacity(3);

    if !ctx.title.is_empty() {
        parts.push(format!("Title: {}", ctx.title));
    }
    if !ctx.url.is_empty() {
        parts.push(format!("URL: {}", ctx.url));
    }
    if !ctx.selected_text.is_empty() {
        parts.push(format!("\nSelected Text:\n{}", ctx.selected_text));
    } else if !ctx.page_text.is_empty() {
        parts.push(format!("\nPage Text (truncated):\n{}", ctx.page_text));
    }

    parts.join("\n")
}
