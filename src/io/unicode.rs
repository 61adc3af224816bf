//! Unicode utilities for text truncation.
//!
//! Page text limits are counted in characters (Unicode scalar values), so
//! every cut lands on a character boundary.

/// Byte offset just past the first `n` characters of `s`.
///
/// Returns `s.len()` when `s` has `n` characters or fewer.
#[must_use]
pub fn char_byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

/// Truncates `s` to `max_chars` characters, appending `marker` when cut.
///
/// Text at or under the limit is returned unchanged.
#[must_use]
pub fn truncate_with_marker(s: &str, max_chars: usize, marker: &str) -> String {
    let cut = char_byte_offset(s, max_chars);
    if cut == s.len() {
        s.to_string()
    } else {
        let mut out = String::with_capacity(cut + marker.len());
        out.push_str(&s[..cut]);
        out.push_str(marker);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_byte_offset() {
        let s = "Hello 世界"; // "Hello " is 6 bytes, '世' and '界' are 3 bytes each
        assert_eq!(char_byte_offset(s, 0), 0);
        assert_eq!(char_byte_offset(s, 6), 6);
        assert_eq!(char_byte_offset(s, 7), 9);
        assert_eq!(char_byte_offset(s, 8), 12);
        assert_eq!(char_byte_offset(s, 100), 12);
    }

    #[test]
    fn test_truncate_with_marker() {
        assert_eq!(truncate_with_marker("abcdef", 3, "…"), "abc…");
        assert_eq!(truncate_with_marker("abc", 3, "…"), "abc");
        assert_eq!(truncate_with_marker("ab", 3, "…"), "ab");
        assert_eq!(truncate_with_marker("世界!", 2, "[cut]"), "世界[cut]");
        assert_eq!(truncate_with_marker("abc", 0, "…"), "…");
    }
}
