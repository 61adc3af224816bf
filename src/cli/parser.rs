//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_PAGE_CHARS, DEFAULT_TIMEOUT_SECS};
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagechat: ask a chat backend about the page you are reading.
///
/// Forwards a question plus page context (title, URL, selection, visible
/// text) to a chat backend and prints the answer.
#[derive(Parser, Debug)]
#[command(name = "pagechat")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Chat endpoint URL.
    #[arg(long, env = "PAGECHAT_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Backend timeout in seconds.
    #[arg(long, env = "PAGECHAT_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask about a page, with context collected from it.
    ///
    /// Without any page option there is no active page and the request
    /// fails before reaching the backend.
    Ask {
        /// The question.
        question: String,

        /// Page snapshot: a `.json` page description or a plain text file.
        #[arg(short, long)]
        page: Option<PathBuf>,

        /// Page title (overrides the snapshot).
        #[arg(long)]
        title: Option<String>,

        /// Page URL (overrides the snapshot).
        #[arg(long)]
        url: Option<String>,

        /// Selected text (overrides the snapshot).
        #[arg(short, long)]
        selection: Option<String>,

        /// Send the visible page text when nothing is selected.
        #[arg(short, long)]
        include_page_text: bool,

        /// Maximum page text length in characters.
        #[arg(long, default_value_t = DEFAULT_MAX_PAGE_CHARS)]
        max_page_chars: usize,
    },

    /// Send a message with typed context straight to the backend.
    Chat {
        /// The message.
        message: String,

        /// Free-form context to send along.
        #[arg(short, long, default_value = "")]
        context: String,
    },

    /// Check the backend's status route.
    #[command(alias = "ping")]
    Status,

    /// Show the backend's conversation history.
    History,

    /// Clear the backend's conversation state.
    Reset,

    /// Show conversation analytics.
    Analytics,

    /// Interactive conversation (history replay, /reset, /analytics, /quit).
    Repl,
}

impl Cli {
    /// Builds the client configuration from the global options.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or timeout is invalid.
    pub fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::new(&self.endpoint, self.timeout)
    }
}
