//! Context collection.
//!
//! The collector plays the role of a content script: it owns one page and
//! answers `GET_CONTEXT` requests with the page's selection and (bounded)
//! visible text. It never modifies the page.

pub mod actor;
pub mod extract;

pub use actor::{CollectorHandle, CollectorRequest, ReplySender, spawn_collector};
pub use extract::{TRUNCATION_MARKER, collect, handle_message, page_text, selected_text};
