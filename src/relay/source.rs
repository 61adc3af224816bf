//! Active context sources.
//!
//! A source is the "tab" a question is about: it carries the metadata the
//! relay falls back to, plus an optional handle to the collector serving
//! the page.

use crate::collector::{CollectorHandle, spawn_collector};
use crate::core::{Page, PageContext};
use async_trait::async_trait;

/// A context source the relay can ask for page context.
#[derive(Debug, Clone, Default)]
pub struct Source {
    /// Source identifier.
    pub id: u64,

    /// Title known at the source level.
    pub title: String,

    /// URL known at the source level.
    pub url: String,

    /// Collector serving the source's page, if one is attached.
    pub collector: Option<CollectorHandle>,
}

impl Source {
    /// Creates a source with metadata and no collector.
    pub fn new(id: u64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            collector: None,
        }
    }

    /// Attaches a collector.
    #[must_use]
    pub fn with_collector(mut self, collector: CollectorHandle) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Creates a source for `page` with a freshly spawned collector.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn from_page(id: u64, page: Page, max_chars: usize) -> Self {
        let title = page.title.clone();
        let url = page.url.clone();
        Self::new(id, title, url).with_collector(spawn_collector(page, max_chars))
    }

    /// Context built from source metadata alone.
    #[must_use]
    pub fn fallback_context(&self) -> PageContext {
        PageContext::metadata_only(self.title.clone(), self.url.clone())
    }
}

/// Resolves the source the user is currently looking at.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Returns the active source, or `None` if there is none.
    async fn active_source(&self) -> Option<Source>;
}

/// A provider that always resolves to the same source (or none).
#[derive(Debug, Clone, Default)]
pub struct FixedSource(Option<Source>);

impl FixedSource {
    /// Provider resolving to `source`.
    #[must_use]
    pub const fn new(source: Source) -> Self {
        Self(Some(source))
    }

    /// Provider with no active source.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SourceProvider for FixedSource {
    async fn active_source(&self) -> Option<Source> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_context() {
        let source = Source::new(7, "Docs", "https://docs.rs");
        let ctx = source.fallback_context();
        assert_eq!(ctx.title, "Docs");
        assert_eq!(ctx.url, "https://docs.rs");
        assert!(ctx.selected_text.is_empty());
        assert!(ctx.page_text.is_empty());
    }

    #[tokio::test]
    async fn test_fixed_source() {
        assert!(FixedSource::none().active_source().await.is_none());

        let provider = FixedSource::new(Source::new(1, "T", "u"));
        let source = provider.active_source().await.unwrap();
        assert_eq!(source.id, 1);
        assert!(source.collector.is_none());
    }

    #[tokio::test]
    async fn test_from_page_attaches_collector() {
        let page = Page::new("u", "T").with_selection("foo");
        let source = Source::from_page(3, page, 8000);
        assert_eq!(source.title, "T");

        let reply = source
            .collector
            .as_ref()
            .unwrap()
            .get_context(false)
            .await
            .unwrap();
        assert_eq!(reply.context.selected_text, "foo");
    }
}
