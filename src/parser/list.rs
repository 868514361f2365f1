//! Image list (manifest) parsing.
//!
//! Each non-blank line holds an image path and a repeat count separated by
//! whitespace:
//!
//! ```text
//! cards/bolt.png 4
//! cards/island.png 1
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ProxyError, Result};

/// A single `<path> <count>` line from the image list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: PathBuf,
    pub count: u32,
}

/// Parse image list source into entries, preserving file order.
pub fn parse_manifest(source: &str) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [path, count] = tokens.as_slice() else {
            return Err(ProxyError::ManifestFormat {
                line: line_no,
                message: format!("expected `<path> <count>`, found {} token(s)", tokens.len()),
                help: Some("Paths containing spaces are not supported".to_string()),
            });
        };

        let count: u32 = count.parse().map_err(|_| ProxyError::ManifestFormat {
            line: line_no,
            message: format!("invalid count '{}' for {}", count, path),
            help: Some("Counts must be positive integers".to_string()),
        })?;

        if count == 0 {
            return Err(ProxyError::ManifestFormat {
                line: line_no,
                message: format!("count for {} must be at least 1", path),
                help: Some("Remove the line to leave the image out".to_string()),
            });
        }

        entries.push(ManifestEntry {
            path: PathBuf::from(path),
            count,
        });
    }

    Ok(entries)
}

/// Flatten entries into the placement list, one path per copy.
pub fn expand_entries(entries: &[ManifestEntry]) -> Vec<PathBuf> {
    entries
        .iter()
        .flat_map(|e| std::iter::repeat(e.path.clone()).take(e.count as usize))
        .collect()
}

/// Read an image list file and return the flat placement list.
pub fn load_image_list(path: &Path) -> Result<Vec<PathBuf>> {
    let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProxyError::ManifestNotFound {
            path: path.to_path_buf(),
        },
        _ => ProxyError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image list: {}", e),
        },
    })?;

    let entries = parse_manifest(&source)?;
    Ok(expand_entries(&entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_expand_preserves_order() {
        let entries = parse_manifest("card.png 3\nother.png 1\n").unwrap();
        assert_eq!(
            expand_entries(&entries),
            paths(&["card.png", "card.png", "card.png", "other.png"])
        );
    }

    #[test]
    fn test_length_is_sum_of_counts() {
        let source = "a.png 2\nb.png 5\nc.png 1\na.png 1\n";
        let entries = parse_manifest(source).unwrap();
        let total: u32 = entries.iter().map(|e| e.count).sum();
        let list = expand_entries(&entries);
        assert_eq!(list.len(), total as usize);
        assert_eq!(list.len(), 9);
        // copies of a path stay contiguous, file order is kept
        assert_eq!(&list[..2], &paths(&["a.png", "a.png"])[..]);
        assert_eq!(list[7], PathBuf::from("c.png"));
        assert_eq!(list[8], PathBuf::from("a.png"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let entries = parse_manifest("\n   \na.png 1\n\n\tb.png 2\n\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].path, PathBuf::from("b.png"));
        assert_eq!(entries[1].count, 2);

        // errors still report the physical line number
        let err = parse_manifest("\n\na.png 1\n\nb.png\n").unwrap_err();
        assert!(matches!(err, ProxyError::ManifestFormat { line: 5, .. }));
    }

    #[test]
    fn test_crlf_line_endings() {
        let entries = parse_manifest("a.png 2\r\nb.png 1\r\n").unwrap();
        assert_eq!(expand_entries(&entries), paths(&["a.png", "a.png", "b.png"]));
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_manifest("").unwrap().is_empty());
        assert!(parse_manifest("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_count() {
        let err = parse_manifest("a.png 1\nb.png\n").unwrap_err();
        assert!(matches!(err, ProxyError::ManifestFormat { line: 2, .. }));
    }

    #[test]
    fn test_too_many_tokens() {
        let err = parse_manifest("my card.png 1\n").unwrap_err();
        assert!(matches!(err, ProxyError::ManifestFormat { line: 1, .. }));
    }

    #[test]
    fn test_non_integer_count() {
        let err = parse_manifest("a.png three\n").unwrap_err();
        match err {
            ProxyError::ManifestFormat { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("three"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(parse_manifest("a.png -1\n").is_err());
        assert!(parse_manifest("a.png 1.5\n").is_err());
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = parse_manifest("a.png 0\n").unwrap_err();
        assert!(matches!(err, ProxyError::ManifestFormat { line: 1, .. }));
    }

    #[test]
    fn test_load_image_list() {
        let dir = tempdir().unwrap();
        let list_path = dir.path().join("images.txt");
        std::fs::write(&list_path, "card.png 2\n\nother.png 1\n").unwrap();

        let list = load_image_list(&list_path).unwrap();
        assert_eq!(list, paths(&["card.png", "card.png", "other.png"]));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_image_list(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ProxyError::ManifestNotFound { .. }));
    }
}
