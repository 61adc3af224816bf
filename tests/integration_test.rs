//! Integration tests for pagechat.

#![allow(clippy::expect_used)]

use async_trait::async_trait;
use pagechat::backend::{BackendClient, ChatBackend};
use pagechat::collector::{TRUNCATION_MARKER, collect, page_text, selected_text};
use pagechat::config::ClientConfig;
use pagechat::core::Page;
use pagechat::error::{Error, Result};
use pagechat::io::read_page;
use pagechat::relay::{FixedSource, Relay, Source, spawn_relay};
use pagechat::surface::{Popup, TextBuffer};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAX_CHARS: usize = 8000;

/// Helper to create a client pointed at a mock server.
fn client_for(server: &MockServer) -> BackendClient {
    let config = ClientConfig::new(&format!("{}/api/chat", server.uri()), 5)
        .expect("Failed to create config");
    BackendClient::new(config).expect("Failed to create client")
}

/// Counts every send before delegating.
struct CountingBackend {
    inner: BackendClient,
    calls: AtomicUsize,
}

#[async_trait]
impl ChatBackend for CountingBackend {
    async fn send(&self, message: &str, context: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.send(message, context).await
    }
}

async fn mount_answer(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "response": answer})),
        )
        .mount(server)
        .await;
}

async fn sent_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("JSON request body"))
        .collect()
}

#[tokio::test]
async fn test_relay_without_context() {
    let server = MockServer::start().await;
    mount_answer(&server, "hi there").await;

    let relay = Relay::new(
        Arc::new(FixedSource::new(Source::from_page(1, Page::default(), MAX_CHARS))),
        Arc::new(client_for(&server)),
    );
    let result = relay.relay("hello", false).await;

    assert!(result.ok);
    assert_eq!(result.answer.as_deref(), Some("hi there"));
    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies, vec![json!({"message": "hello", "context": ""})]);
}

#[tokio::test]
async fn test_relay_with_selection() {
    let server = MockServer::start().await;
    mount_answer(&server, "it is foo").await;

    let page = Page::new("u", "T")
        .with_selection("foo")
        .with_body_text("foo and a lot more");
    let relay = Relay::new(
        Arc::new(FixedSource::new(Source::from_page(1, page, MAX_CHARS))),
        Arc::new(client_for(&server)),
    );
    let result = relay.relay("what?", true).await;

    assert!(result.ok);
    let bodies = sent_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0]["context"],
        "Title: T\nURL: u\n\nSelected Text:\nfoo"
    );
}

#[tokio::test]
async fn test_relay_connection_refused_single_attempt() {
    // Reserve a port, then free it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let config = ClientConfig::new(&format!("http://127.0.0.1:{port}/api/chat"), 5)
        .expect("Failed to create config");
    let backend = Arc::new(CountingBackend {
        inner: BackendClient::new(config).expect("Failed to create client"),
        calls: AtomicUsize::new(0),
    });

    let relay = Relay::new(
        Arc::new(FixedSource::new(Source::new(1, "T", "u"))),
        backend.clone(),
    );
    let result = relay.relay("hello", false).await;

    assert!(!result.ok);
    assert!(!result.error.unwrap_or_default().is_empty());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delayed_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "response": "late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(&format!("{}/api/chat", server.uri()), 5)
        .expect("Failed to create config")
        .with_timeout(Duration::from_millis(200));
    let client = BackendClient::new(config).expect("Failed to create client");

    let err = client.send("hello", "").await.expect_err("should time out");
    assert!(matches!(err, Error::Timeout { .. }));
}

#[tokio::test]
async fn test_popup_end_to_end() {
    let server = MockServer::start().await;
    mount_answer(&server, "42").await;

    let relay = Relay::new(
        Arc::new(FixedSource::new(Source::from_page(
            7,
            Page::new("https://example.com", "Example").with_body_text("the answer is 42"),
            MAX_CHARS,
        ))),
        Arc::new(client_for(&server)),
    );
    let output = TextBuffer::new();
    let popup = Popup::new(Arc::new(output.clone()), spawn_relay(relay));

    let result = popup.ask("what is the answer?", true).await.expect("relay reachable");
    assert!(result.ok);
    assert_eq!(output.frames(), vec!["Thinking...", "42"]);

    let bodies = sent_bodies(&server).await;
    assert_eq!(
        bodies[0]["context"],
        "Title: Example\nURL: https://example.com\n\nPage Text (truncated):\nthe answer is 42"
    );
}

#[tokio::test]
async fn test_popup_without_active_source() {
    let server = MockServer::start().await;
    let relay = Relay::new(Arc::new(FixedSource::none()), Arc::new(client_for(&server)));
    let output = TextBuffer::new();
    let popup = Popup::new(Arc::new(output.clone()), spawn_relay(relay));

    let result = popup.ask("anyone?", false).await.expect("relay reachable");
    assert!(!result.ok);
    assert_eq!(output.text(), "Error: No active tab found");
    assert!(sent_bodies(&server).await.is_empty());
}

#[test]
fn test_page_snapshot_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("page.json");
    std::fs::write(
        &path,
        r#"{"url": "https://a.example", "title": "A", "selectedText": "  sel  ", "bodyText": "body"}"#,
    )
    .expect("Failed to write snapshot");

    let page = read_page(&path).expect("read_page failed");
    assert_eq!(page.url, "https://a.example");
    assert_eq!(selected_text(&page), "sel");
    assert_eq!(page_text(&page, MAX_CHARS), "body");
}

#[test]
fn test_page_snapshot_plain_text() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("article.txt");
    std::fs::write(&path, "just some text").expect("Failed to write snapshot");

    let page = read_page(&path).expect("read_page failed");
    assert_eq!(page.body_text, "just some text");
    assert!(page.selection.is_none());
}

#[test]
fn test_page_snapshot_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    assert!(read_page(&temp_dir.path().join("missing.json")).is_err());
}

proptest! {
    #[test]
    fn prop_page_text_bounded(text in "[a-zA-Z0-9.,éü日本]{0,300}", max in 1usize..200) {
        let page = Page::default().with_body_text(text.clone());
        let out = page_text(&page, max);
        let len = text.chars().count();

        if len > max {
            let kept = out.strip_suffix(TRUNCATION_MARKER).expect("marker appended");
            prop_assert_eq!(kept.chars().count(), max);
            prop_assert!(text.starts_with(kept));
        } else {
            prop_assert_eq!(out, text);
        }
    }

    #[test]
    fn prop_page_text_only_when_requested(text in "[a-z ]{0,100}") {
        let page = Page::new("u", "T").with_body_text(text);
        prop_assert_eq!(collect(&page, false, MAX_CHARS).page_text, "");
    }

    #[test]
    fn prop_selection_trimmed(sel in "[ \\t]{0,3}[a-z]{0,20}[ \\t]{0,3}") {
        let page = Page::default().with_selection(sel.clone());
        prop_assert_eq!(selected_text(&page), sel.trim());
    }
}
