//! Chat request/response types and backend payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a chat POST.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,

    /// Context string assembled from the page (may be empty).
    #[serde(default)]
    pub context: String,
}

impl ChatRequest {
    /// Creates a request from a message and context.
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Parsed backend answer.
///
/// Every field is optional; the backend is only trusted to return JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Application-level success flag.
    pub success: Option<bool>,

    /// Answer text.
    pub response: Option<String>,

    /// Server-supplied error message.
    pub error: Option<String>,
}

impl ChatResponse {
    /// Extracts the known fields from any JSON value.
    ///
    /// Non-object values and fields of the wrong type are treated as absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool),
            response: value
                .get("response")
                .and_then(Value::as_str)
                .map(str::to_string),
            error: value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Returns true if the backend explicitly reported failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.success, Some(false))
    }

    /// Server error message, ignoring empty strings.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Outcome of one relay, as returned to the popup.
///
/// Serializes to `{"ok":true,"answer":..}` or `{"ok":false,"error":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResult {
    /// Whether the relay produced an answer.
    pub ok: bool,

    /// Answer text on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Error text on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResult {
    /// Successful result carrying an answer.
    pub fn success(answer: impl Into<String>) -> Self {
        Self {
            ok: true,
            answer: Some(answer.into()),
            error: None,
        }
    }

    /// Failed result carrying an error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            answer: None,
            error: Some(error.into()),
        }
    }
}

/// One prior user/assistant exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// What the user said.
    #[serde(default)]
    pub user: String,

    /// What the assistant answered.
    #[serde(default)]
    pub ai: String,
}

/// Conversation history kept by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Exchanges in chronological order.
    #[serde(default)]
    pub history: Vec<Exchange>,
}

/// A topic and how often it was mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    /// Topic name.
    pub topic: String,

    /// Mention count.
    pub count: u64,
}

/// Conversation analytics reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    /// Number of user/assistant exchanges.
    #[serde(default)]
    pub total_exchanges: u64,

    /// Number of facts the backend has learned.
    #[serde(default)]
    pub memories_learned: u64,

    /// Average sentiment in `[-1, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<f64>,

    /// Most frequent topics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_topics: Option<Vec<TopicCount>>,
}

impl Analytics {
    /// Human label for the sentiment score.
    #[must_use]
    pub fn sentiment_label(&self) -> Option<&'static str> {
        self.sentiment.map(|s| {
            if s > 0.3 {
                "Positive"
            } else if s < -0.3 {
                "Negative"
            } else {
                "Neutral"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_body() {
        let req = ChatRequest::new("hello", "");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"message": "hello", "context": ""}));
    }

    #[test]
    fn test_chat_response_from_value() {
        let resp = ChatResponse::from_value(&json!({"success": true, "response": "hi"}));
        assert_eq!(resp.success, Some(true));
        assert_eq!(resp.response.as_deref(), Some("hi"));
        assert!(!resp.is_failure());

        let resp = ChatResponse::from_value(&json!({"success": false, "error": "X"}));
        assert!(resp.is_failure());
        assert_eq!(resp.error_message(), Some("X"));
    }

    #[test]
    fn test_chat_response_lenient() {
        let resp = ChatResponse::from_value(&json!(["not", "an", "object"]));
        assert_eq!(resp, ChatResponse::default());

        let resp = ChatResponse::from_value(&json!({"success": "yes", "error": ""}));
        assert_eq!(resp.success, None);
        assert_eq!(resp.error_message(), None);
    }

    #[test]
    fn test_relay_result_shapes() {
        let ok = serde_json::to_value(RelayResult::success("42")).unwrap();
        assert_eq!(ok, json!({"ok": true, "answer": "42"}));

        let err = serde_json::to_value(RelayResult::failure("boom")).unwrap();
        assert_eq!(err, json!({"ok": false, "error": "boom"}));
    }

    #[test]
    fn test_history_missing_field() {
        let history: History = serde_json::from_str("{}").unwrap();
        assert!(history.history.is_empty());

        let history: History =
            serde_json::from_str(r#"{"history":[{"user":"hi","ai":"hello"}]}"#).unwrap();
        assert_eq!(history.history.len(), 1);
        assert_eq!(history.history[0].ai, "hello");
    }

    #[test]
    fn test_analytics_sentiment_label() {
        let mut analytics = Analytics::default();
        assert_eq!(analytics.sentiment_label(), None);

        analytics.sentiment = Some(0.5);
        assert_eq!(analytics.sentiment_label(), Some("Positive"));
        analytics.sentiment = Some(-0.31);
        assert_eq!(analytics.sentiment_label(), Some("Negative"));
        analytics.sentiment = Some(0.3);
        assert_eq!(analytics.sentiment_label(), Some("Neutral"));
    }

    #[test]
    fn test_analytics_parse() {
        let analytics: Analytics = serde_json::from_value(json!({
            "total_exchanges": 3,
            "memories_learned": 1,
            "top_topics": [{"topic": "rust", "count": 2}]
        }))
        .unwrap();
        assert_eq!(analytics.total_exchanges, 3);
        assert_eq!(analytics.top_topics.unwrap()[0].topic, "rust");
    }
}
