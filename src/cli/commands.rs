//! CLI command implementations.
//!
//! Contains the wiring for each CLI command: every command builds the
//! surface it stands in for and reports what that surface displayed.

use crate::backend::BackendClient;
use crate::cli::output::{
    OutputFormat, format_analytics_output, format_answer, format_history, format_relay_result,
    format_reset, format_status,
};
use crate::cli::parser::{Cli, Commands};
use crate::config::ClientConfig;
use crate::core::Page;
use crate::error::{Error, Result};
use crate::io::read_page;
use crate::relay::{FixedSource, Relay, Source, spawn_relay};
use crate::surface::{
    CLEARED, ChatPage, Popup, Role, TextBuffer, Transcript, TranscriptLog, TranscriptView,
};
use std::io::Write as IoWrite;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.client_config()?;
    debug!(endpoint = %config.endpoint, timeout = ?config.timeout, "client configured");

    match &cli.command {
        Commands::Ask {
            question,
            page,
            title,
            url,
            selection,
            include_page_text,
            max_page_chars,
        } => {
            let page = resolve_page(
                page.as_deref(),
                title.as_deref(),
                url.as_deref(),
                selection.as_deref(),
            )?;
            cmd_ask(
                config.with_max_page_chars(*max_page_chars),
                question,
                page,
                *include_page_text,
                format,
            )
            .await
        }
        Commands::Chat { message, context } => cmd_chat(config, message, context, format).await,
        Commands::Status => cmd_status(config, format).await,
        Commands::History => cmd_history(config, format).await,
        Commands::Reset => cmd_reset(config, format).await,
        Commands::Analytics => cmd_analytics(config, format).await,
        Commands::Repl => cmd_repl(config).await,
    }
}

/// Builds the active page from a snapshot and explicit overrides.
///
/// Returns `None` when nothing describes a page.
fn resolve_page(
    snapshot: Option<&Path>,
    title: Option<&str>,
    url: Option<&str>,
    selection: Option<&str>,
) -> Result<Option<Page>> {
    if snapshot.is_none() && title.is_none() && url.is_none() && selection.is_none() {
        return Ok(None);
    }

    let mut page = match snapshot {
        Some(path) => read_page(path)?,
        None => Page::default(),
    };
    if let Some(title) = title {
        page.title = title.to_string();
    }
    if let Some(url) = url {
        page.url = url.to_string();
    }
    if let Some(selection) = selection {
        page.selection = Some(selection.to_string());
    }
    Ok(Some(page))
}

// ==================== Command Implementations ====================

async fn cmd_ask(
    config: ClientConfig,
    question: &str,
    page: Option<Page>,
    include_page_text: bool,
    format: OutputFormat,
) -> Result<String> {
    let max_chars = config.max_page_chars;
    let backend = Arc::new(BackendClient::new(config)?);
    let sources = match page {
        Some(page) => FixedSource::new(Source::from_page(1, page, max_chars)),
        None => FixedSource::none(),
    };

    let output = TextBuffer::new();
    let popup = Popup::new(
        Arc::new(output.clone()),
        spawn_relay(Relay::new(Arc::new(sources), backend)),
    );

    let result = popup.ask(question, include_page_text).await?;
    if result.ok {
        Ok(format_relay_result(&result, &output.text(), format))
    } else {
        Err(Error::backend(result.error.unwrap_or_default()))
    }
}

async fn cmd_chat(
    config: ClientConfig,
    message: &str,
    context: &str,
    format: OutputFormat,
) -> Result<String> {
    let output = TextBuffer::new();
    let page = ChatPage::new(Arc::new(output.clone()), BackendClient::new(config)?);
    let answer = page.ask(message, context).await?;
    Ok(format_answer(&answer, &output.text(), format))
}

async fn cmd_status(config: ClientConfig, format: OutputFormat) -> Result<String> {
    let output = TextBuffer::new();
    let page = ChatPage::new(Arc::new(output.clone()), BackendClient::new(config)?);
    let status = page.ping().await?;
    Ok(format_status(&status, &output.text(), format))
}

async fn cmd_history(config: ClientConfig, format: OutputFormat) -> Result<String> {
    let history = BackendClient::new(config)?.history().await?;
    Ok(format_history(&history, format))
}

async fn cmd_reset(config: ClientConfig, format: OutputFormat) -> Result<String> {
    let log = TranscriptLog::new();
    let transcript = Transcript::new(Arc::new(log), BackendClient::new(config)?);
    transcript.reset().await?;
    Ok(format_reset(CLEARED, format))
}

async fn cmd_analytics(config: ClientConfig, format: OutputFormat) -> Result<String> {
    let analytics = BackendClient::new(config)?.analytics().await?;
    Ok(format_analytics_output(&analytics, format))
}

/// Writes transcript lines to a terminal stream.
///
/// A broken pipe marks the view closed so the REPL can stop; other write
/// errors are dropped.
struct ConsoleView<W> {
    out: Mutex<W>,
    closed: AtomicBool,
}

impl<W: IoWrite> ConsoleView<W> {
    const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            closed: AtomicBool::new(false),
        }
    }

    fn write_text(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush())
            && e.kind() == std::io::ErrorKind::BrokenPipe
        {
            self.closed.store(true, Ordering::Relaxed);
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl<W: IoWrite + Send> TranscriptView for ConsoleView<W> {
    fn add_message(&self, role: Role, text: &str) {
        self.write_text(&format!("{}: {text}\n", role.label()));
    }

    fn clear(&self) {
        self.write_text("--\n");
    }
}

async fn cmd_repl(config: ClientConfig) -> Result<String> {
    let console = Arc::new(ConsoleView::new(std::io::stdout()));
    let transcript = Transcript::new(console.clone(), BackendClient::new(config)?);
    transcript.load_history().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !console.is_closed()
        && let Some(line) = lines.next_line().await?
    {
        match line.trim() {
            "" => {}
            "/quit" | "/exit" => break,
            "/reset" => {
                if let Err(e) = transcript.reset().await {
                    console.add_message(Role::Ai, &format!("Error: {e}"));
                }
            }
            "/analytics" => console.write_text(&transcript.analytics().await),
            message => {
                // Failures are already shown in the transcript.
                let _ = transcript.send(message).await;
            }
        }
    }

    Ok(String::new())
}
