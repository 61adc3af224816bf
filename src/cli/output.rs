//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Analytics, History, RelayResult};
use crate::error::Error;
use crate::surface::format_analytics;
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a relay answer.
///
/// `rendered` is what the popup displayed for it.
#[must_use]
pub fn format_relay_result(result: &RelayResult, rendered: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => with_newline(rendered),
        OutputFormat::Json => format_json(result),
    }
}

/// Formats a direct chat answer.
#[must_use]
pub fn format_answer(answer: &str, rendered: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => with_newline(rendered),
        OutputFormat::Json => format_json(&RelayResult::success(answer)),
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(status: &Value, rendered: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => with_newline(rendered),
        OutputFormat::Json => format_json(status),
    }
}

/// Formats conversation history.
#[must_use]
pub fn format_history(history: &History, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_history_text(history),
        OutputFormat::Json => format_json(history),
    }
}

fn format_history_text(history: &History) -> String {
    if history.history.is_empty() {
        return "No history.\n".to_string();
    }

    let mut output = String::new();
    for (i, exchange) in history.history.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "You: {}", exchange.user);
        let _ = writeln!(output, "AI:  {}", exchange.ai);
    }
    output
}

/// Formats analytics.
#[must_use]
pub fn format_analytics_output(analytics: &Analytics, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_analytics(analytics),
        OutputFormat::Json => format_json(analytics),
    }
}

/// Formats a reset confirmation.
#[must_use]
pub fn format_reset(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => with_newline(message),
        OutputFormat::Json => format_json(&json!({ "ok": true, "message": message })),
    }
}

/// Formats an error.
///
/// JSON errors use the same shape as a failed relay.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&RelayResult::failure(error.to_string())),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn with_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{s}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Exchange;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_relay_result() {
        let result = RelayResult::success("42");
        assert_eq!(format_relay_result(&result, "42", OutputFormat::Text), "42\n");

        let json = format_relay_result(&result, "42", OutputFormat::Json);
        assert!(json.contains("\"ok\": true"));
        assert!(json.contains("\"answer\": \"42\""));
    }

    #[test]
    fn test_format_history() {
        let history = History {
            history: vec![
                Exchange {
                    user: "hi".to_string(),
                    ai: "hello".to_string(),
                },
                Exchange {
                    user: "bye".to_string(),
                    ai: "ciao".to_string(),
                },
            ],
        };
        let text = format_history(&history, OutputFormat::Text);
        assert_eq!(text, "You: hi\nAI:  hello\n\nYou: bye\nAI:  ciao\n");

        assert_eq!(
            format_history(&History::default(), OutputFormat::Text),
            "No history.\n"
        );
    }

    #[test]
    fn test_format_error_json_shape() {
        let err = Error::backend("X");
        let json: Value = serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(json, json!({"ok": false, "error": "X"}));
        assert_eq!(format_error(&err, OutputFormat::Text), "X");
    }

    #[test]
    fn test_format_reset() {
        assert_eq!(format_reset("done", OutputFormat::Text), "done\n");
        assert!(format_reset("done", OutputFormat::Json).contains("\"ok\": true"));
    }
}
