//! # pagechat
//!
//! Page-aware chat relay.
//!
//! pagechat forwards a question, together with context taken from the page
//! being read (title, URL, selected text, and optionally the visible page
//! text), to an HTTP chat backend and renders the answer.
//!
//! ## Features
//!
//! - **Context Collection**: Selection-first extraction with bounded page text
//! - **Relay**: One request per question, recovered context on collector failure
//! - **Backend Client**: Single-attempt JSON client with a hard timeout
//! - **Surfaces**: Popup, chat page, and running transcript renderers

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod cli;
pub mod collector;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod relay;
pub mod surface;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{
    Analytics, ChatRequest, ChatResponse, ContextReply, History, Message, Page, PageContext,
    RelayResult,
};

// Re-export configuration
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

// Re-export backend types
pub use backend::{BackendClient, ChatBackend};

// Re-export collector types
pub use collector::{CollectorHandle, spawn_collector};

// Re-export relay types
pub use relay::{FixedSource, Relay, RelayHandle, Source, SourceProvider, spawn_relay};

// Re-export surface types
pub use surface::{ChatPage, OutputArea, Popup, Transcript, TranscriptView};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
