//! Frontmatter handling.
//!
//! A document has frontmatter when, ignoring leading whitespace, its first
//! line is exactly `---` and the delimiter occurs at least once more. The
//! body is everything after the second delimiter; later `---` occurrences
//! (horizontal rules) are kept.

use serde::Deserialize;

/// Frontmatter delimiter.
const DELIMITER: &str = "---";

/// Fields of the metadata block used for display.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrontMatter {
    /// Page title.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse a YAML metadata block.
    ///
    /// Returns `None` if the block is not a YAML mapping with the expected
    /// field types. Presentation metadata is optional, so a bad block never
    /// fails the render.
    #[must_use]
    pub fn parse(block: &str) -> Option<Self> {
        match serde_yaml::from_str(block) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparsable frontmatter");
                None
            }
        }
    }
}

/// Split a document into its metadata block and body.
///
/// Returns `(None, text)` unchanged when the document has no frontmatter.
#[must_use]
pub fn split_frontmatter(text: &str) -> (Option<&str>, String) {
    let first_line = text.trim_start().lines().next().unwrap_or_default();
    if first_line.trim_end() != DELIMITER {
        return (None, text.to_owned());
    }

    let parts: Vec<&str> = text.split(DELIMITER).collect();
    if parts.len() < 3 {
        return (None, text.to_owned());
    }

    let body = parts[2..].join(DELIMITER);
    (Some(parts[1]), body.trim().to_owned())
}

/// Remove a leading frontmatter block.
///
/// # Examples
///
/// ```
/// use tome_renderer::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\na: 1\n---\nBody"), "Body");
/// assert_eq!(strip_frontmatter("Body only"), "Body only");
/// ```
#[must_use]
pub fn strip_frontmatter(text: &str) -> String {
    split_frontmatter(text).1
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_basic() {
        assert_eq!(strip_frontmatter("---\na: 1\n---\nBody"), "Body");
    }

    #[test]
    fn test_strip_without_frontmatter_is_unchanged() {
        assert_eq!(strip_frontmatter("Body only"), "Body only");
        assert_eq!(strip_frontmatter("  \n# Title\n"), "  \n# Title\n");
    }

    #[test]
    fn test_strip_missing_closing_delimiter_is_unchanged() {
        let text = "---\ntitle: Draft\nno closing delimiter";

        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_strip_keeps_rules_in_body() {
        let text = "---\ntitle: T\n---\nAbove\n\n---\n\nBelow\n";

        assert_eq!(strip_frontmatter(text), "Above\n\n---\n\nBelow");
    }

    #[test]
    fn test_strip_tolerates_leading_whitespace() {
        assert_eq!(strip_frontmatter("\n\n---\na: 1\n---\n\nBody\n"), "Body");
    }

    #[test]
    fn test_strip_requires_exact_delimiter_line() {
        let text = "----\na: 1\n---\nBody";

        assert_eq!(strip_frontmatter(text), text);
    }

    #[test]
    fn test_split_returns_metadata_block() {
        let (meta, body) = split_frontmatter("---\ntitle: Jobs\n---\n# Jobs");

        assert_eq!(meta, Some("\ntitle: Jobs\n"));
        assert_eq!(body, "# Jobs");
    }

    #[test]
    fn test_parse_frontmatter_fields() {
        let meta = FrontMatter::parse("title: Jobs\ndescription: Scheduling\nweight: 3").unwrap();

        assert_eq!(meta.title.as_deref(), Some("Jobs"));
        assert_eq!(meta.description.as_deref(), Some("Scheduling"));
    }

    #[test]
    fn test_parse_frontmatter_invalid_yaml() {
        assert!(FrontMatter::parse("title: [unclosed").is_none());
    }
}
