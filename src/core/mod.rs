//! Core domain models for pagechat.
//!
//! This module contains the data structures exchanged during a single
//! round trip: page snapshots and the context extracted from them, the
//! chat request/response pair, the relay result, and the messages the
//! actors pass to each other. These are pure domain models with no I/O
//! dependencies.

pub mod chat;
pub mod message;
pub mod page;

pub use chat::{Analytics, ChatRequest, ChatResponse, Exchange, History, RelayResult, TopicCount};
pub use message::{ContextReply, Message};
pub use page::{Page, PageContext};
