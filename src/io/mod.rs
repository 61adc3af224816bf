//! I/O utilities for pagechat.
//!
//! Provides page snapshot loading along with the Unicode helpers used to
//! bound page text.

pub mod reader;
pub mod unicode;

pub use reader::{read_file, read_page};
pub use unicode::{char_byte_offset, truncate_with_marker};
