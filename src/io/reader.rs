//! Page snapshot loading.
//!
//! A snapshot is either a JSON document describing a [`Page`] or a plain
//! text file whose content becomes the page's body text.

use crate::core::Page;
use crate::error::{IoError, Result};
use std::path::Path;

/// Maximum snapshot size accepted (16MB).
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Reads a UTF-8 file into a string.
///
/// # Errors
///
/// Returns an error if the file doesn't exist, is too large, or is not
/// valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use pagechat::io::read_file;
///
/// let content = read_file("article.txt").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let metadata = std::fs::metadata(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str,
            reason: format!(
                "file size {} exceeds maximum {}",
                metadata.len(),
                MAX_FILE_SIZE
            ),
        }
        .into());
    }

    let bytes = std::fs::read(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: format!("invalid UTF-8: {e}"),
        }
        .into()
    })
}

/// Loads a page snapshot.
///
/// Files ending in `.json` are parsed as a [`Page`]; anything else is read
/// as the page's visible text with no title, URL, or selection.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn read_page<P: AsRef<Path>>(path: P) -> Result<Page> {
    let path_ref = path.as_ref();
    let content = read_file(path_ref)?;

    let is_json = path_ref
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| {
            IoError::InvalidSnapshot {
                path: path_ref.to_string_lossy().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    } else {
        Ok(Page::default().with_body_text(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "Hello, world!").unwrap();

        let content = read_file(&file_path).unwrap();
        assert_eq!(content, "Hello, world!");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_file("/nonexistent/path/file.txt");
        assert!(matches!(
            result,
            Err(Error::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bad.txt");
        std::fs::write(&file_path, [0xff, 0xfe]).unwrap();

        let err = read_file(&file_path).unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"));
    }

    #[test]
    fn test_read_page_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("article.txt");
        std::fs::write(&file_path, "  Some article text  ").unwrap();

        let page = read_page(&file_path).unwrap();
        assert_eq!(page.body_text, "  Some article text  ");
        assert!(page.title.is_empty());
        assert!(page.selection.is_none());
    }

    #[test]
    fn test_read_page_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.JSON");
        std::fs::write(
            &file_path,
            r#"{"url":"https://example.com","title":"Example","selection":"foo","body_text":"bar"}"#,
        )
        .unwrap();

        let page = read_page(&file_path).unwrap();
        assert_eq!(page.url, "https://example.com");
        assert_eq!(page.title, "Example");
        assert_eq!(page.selection.as_deref(), Some("foo"));
        assert_eq!(page.body_text, "bar");
    }

    #[test]
    fn test_read_page_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.json");
        std::fs::write(&file_path, "{not json").unwrap();

        let result = read_page(&file_path);
        assert!(matches!(
            result,
            Err(Error::Io(IoError::InvalidSnapshot { .. }))
        ));
    }
}
