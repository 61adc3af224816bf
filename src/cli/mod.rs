//! CLI layer for pagechat.
//!
//! Provides the command-line interface using clap, with one command per
//! surface: the popup (`ask`), the chat page (`chat`, `status`), and the
//! transcript (`history`, `reset`, `analytics`, `repl`).

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
