//! The relay: turns a question plus page context into a backend call.
//!
//! The coordinator is stateless. Each relay resolves the active source,
//! asks its collector for context (best effort), builds the context
//! string, and makes exactly one backend call.

pub mod context;
pub mod coordinator;
pub mod source;
pub mod worker;

pub use context::build_context_string;
pub use coordinator::Relay;
pub use source::{FixedSource, Source, SourceProvider};
pub use worker::{RelayHandle, RelayRequest, spawn_relay};
