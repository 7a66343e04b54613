//! Content tree discovery by filesystem walking.

use std::fs;
use std::io;
use std::path::Path;

use glob::Pattern;

/// File name patterns recognized as documents.
pub const DEFAULT_PATTERNS: &[&str] = &["*.md", "*.markdown"];

/// Walk `root` recursively and return the storage keys of all documents.
///
/// A file is a document when its name matches one of `patterns`. Hidden and
/// underscore-prefixed entries are skipped, as are common build directories.
/// Keys use `/` separators on every platform and are returned sorted so the
/// result is deterministic.
///
/// # Errors
///
/// Returns the I/O error if `root` itself cannot be read. Unreadable
/// subdirectories are skipped with a warning.
pub fn scan_keys(root: &Path, patterns: &[Pattern]) -> io::Result<Vec<String>> {
    let entries = fs::read_dir(root)?;
    let mut keys = Vec::new();
    scan_entries(entries, "", patterns, &mut keys);
    keys.sort();
    Ok(keys)
}

fn scan_directory(dir: &Path, prefix: &str, patterns: &[Pattern], keys: &mut Vec<String>) {
    match fs::read_dir(dir) {
        Ok(entries) => scan_entries(entries, prefix, patterns, keys),
        Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory"),
    }
}

fn scan_entries(entries: fs::ReadDir, prefix: &str, patterns: &[Pattern], keys: &mut Vec<String>) {
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        if is_dir {
            if matches!(name.as_str(), "node_modules" | "target" | "dist" | "build") {
                continue;
            }
            scan_directory(&entry.path(), &key, patterns, keys);
        } else if patterns.iter().any(|p| p.matches(&name)) {
            keys.push(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn default_patterns() -> Vec<Pattern> {
        DEFAULT_PATTERNS
            .iter()
            .map(|p| Pattern::new(p).unwrap())
            .collect()
    }

    #[test]
    fn test_scan_keys_nested_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("markdown/api")).unwrap();
        fs::write(root.join("markdown/introduction.md"), "# Intro").unwrap();
        fs::write(root.join("markdown/api/overview.md"), "# API").unwrap();
        fs::write(root.join("markdown/faq.markdown"), "# FAQ").unwrap();
        fs::write(root.join("markdown/notes.txt"), "ignored").unwrap();

        let keys = scan_keys(root, &default_patterns()).unwrap();

        assert_eq!(
            keys,
            vec![
                "markdown/api/overview.md".to_owned(),
                "markdown/faq.markdown".to_owned(),
                "markdown/introduction.md".to_owned(),
            ]
        );
    }

    #[test]
    fn test_scan_keys_skips_hidden_and_underscore() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join(".git/readme.md"), "x").unwrap();
        fs::write(root.join("node_modules/pkg/readme.md"), "x").unwrap();
        fs::write(root.join("_draft.md"), "x").unwrap();
        fs::write(root.join("guide.md"), "x").unwrap();

        let keys = scan_keys(root, &default_patterns()).unwrap();

        assert_eq!(keys, vec!["guide.md".to_owned()]);
    }

    #[test]
    fn test_scan_keys_missing_root_is_error() {
        let err = scan_keys(Path::new("/nonexistent/tome/root"), &default_patterns()).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_scan_keys_empty_root() {
        let dir = tempfile::tempdir().unwrap();

        assert!(scan_keys(dir.path(), &default_patterns()).unwrap().is_empty());
    }
}
