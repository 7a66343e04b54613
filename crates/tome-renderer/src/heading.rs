//! Heading anchor assignment.
//!
//! Every heading of a rendered document gets a unique, human-readable `id`
//! and the `data-nav-heading` marker. Identifiers are computed per document:
//! the caller owns a [`HeadingRegistry`] for exactly one render and drops it
//! afterwards.
//!
//! The pass is idempotent. Running it on its own output keeps every id,
//! because existing ids are taken as candidates and are already unique.

use std::collections::HashSet;

use serde::Serialize;

use crate::html::{escape_attribute, find_headings, text_content, write_attribute};

/// Marker attribute flagging a heading as a navigation target.
pub const NAV_MARKER: &str = "data-nav-heading";

/// Heading descriptor: anchor id, display text and level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Anchor ID for linking.
    pub id: String,
    /// Heading text.
    pub text: String,
    /// Heading level (1-6).
    pub level: u8,
}

/// Heading awaiting (or carrying) an anchor id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingNode {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain text content.
    pub text: String,
    /// Author-supplied id before the pass, final id after it.
    pub id: Option<String>,
}

impl HeadingNode {
    /// Create a node without an id.
    #[must_use]
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            id: None,
        }
    }

    /// Set an author-supplied id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Convert to a [`Heading`] (empty id if the pass has not run).
    #[must_use]
    pub fn to_heading(&self) -> Heading {
        Heading {
            id: self.id.clone().unwrap_or_default(),
            text: self.text.trim().to_owned(),
            level: self.level,
        }
    }
}

/// Identifiers already assigned within one document render.
#[derive(Debug, Default)]
pub struct HeadingRegistry {
    used: HashSet<String>,
}

impl HeadingRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `candidate`, or `candidate-N` with the lowest unused `N >= 1`.
    pub fn claim(&mut self, candidate: &str) -> String {
        if self.used.insert(candidate.to_owned()) {
            return candidate.to_owned();
        }

        let mut n = 1usize;
        loop {
            let id = format!("{candidate}-{n}");
            if self.used.insert(id.clone()) {
                return id;
            }
            n += 1;
        }
    }

    /// Check whether an id has been claimed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    /// Number of claimed ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no id has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Convert heading text to an anchor slug.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, turns whitespace/hyphen runs into a single hyphen and trims
/// hyphens from both ends.
///
/// # Examples
///
/// ```
/// use tome_renderer::slugify;
///
/// assert_eq!(slugify("C++ & Rust!!"), "c-rust");
/// assert_eq!(slugify("Getting  Started"), "getting-started");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    slug
}

/// Assign unique ids to `nodes` in order, recording them in `registry`.
///
/// Author-supplied ids are used as candidates; headings without usable text
/// fall back to `heading-N` where `N` is the 1-based position in the document.
pub fn assign_ids_to_nodes(nodes: &mut [HeadingNode], registry: &mut HeadingRegistry) {
    for (index, node) in nodes.iter_mut().enumerate() {
        let candidate = match node.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id.to_owned(),
            None => slugify(&node.text),
        };
        let candidate = if candidate.is_empty() {
            format!("heading-{}", index + 1)
        } else {
            candidate
        };
        node.id = Some(registry.claim(&candidate));
    }
}

/// Assign ids to every heading of an HTML fragment using a fresh registry.
///
/// # Examples
///
/// ```
/// use tome_renderer::assign_ids;
///
/// let html = assign_ids("<h2>FAQ</h2><h2>FAQ</h2>");
/// assert_eq!(
///     html,
///     r#"<h2 id="faq" data-nav-heading>FAQ</h2><h2 id="faq-1" data-nav-heading>FAQ</h2>"#
/// );
/// ```
#[must_use]
pub fn assign_ids(html: &str) -> String {
    assign_ids_with(html, &mut HeadingRegistry::new()).0
}

/// Assign ids to every heading of an HTML fragment.
///
/// Returns the rewritten fragment and the headings in document order.
/// Everything outside heading opening/closing tags is copied unchanged.
pub fn assign_ids_with(html: &str, registry: &mut HeadingRegistry) -> (String, Vec<Heading>) {
    let elements = find_headings(html);
    if elements.is_empty() {
        return (html.to_owned(), Vec::new());
    }

    let mut nodes: Vec<HeadingNode> = elements
        .iter()
        .map(|el| HeadingNode {
            level: el.level,
            text: text_content(el.inner),
            id: el.id(),
        })
        .collect();
    assign_ids_to_nodes(&mut nodes, registry);

    let mut output = String::with_capacity(html.len() + elements.len() * 32);
    let mut cursor = 0;
    for (el, node) in elements.iter().zip(&nodes) {
        output.push_str(&html[cursor..el.range.start]);

        let level = el.level;
        output.push_str(&format!("<h{level}"));
        let id = node.id.as_deref().map(escape_attribute);
        write_attribute(&mut output, "id", id.as_deref());
        for attr in el.attributes.iter().filter(|a| !a.is("id")) {
            write_attribute(&mut output, &attr.name, attr.value.as_deref());
        }
        if !el.attributes.iter().any(|a| a.is(NAV_MARKER)) {
            write_attribute(&mut output, NAV_MARKER, None);
        }
        output.push('>');
        output.push_str(el.inner);
        output.push_str(&format!("</h{level}>"));

        cursor = el.range.end;
    }
    output.push_str(&html[cursor..]);

    let headings = nodes.iter().map(HeadingNode::to_heading).collect();
    (output, headings)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("C++ & Rust!!"), "c-rust");
    }

    #[test]
    fn test_slugify_collapses_whitespace_and_hyphens() {
        assert_eq!(slugify("  Docker --  Integration "), "docker-integration");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("__init__ method"), "__init__-method");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
    }

    #[test]
    fn test_slugify_only_symbols() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_registry_lowest_unused_suffix() {
        let mut registry = HeadingRegistry::new();

        assert_eq!(registry.claim("faq"), "faq");
        assert_eq!(registry.claim("faq-2"), "faq-2");
        assert_eq!(registry.claim("faq"), "faq-1");
        assert_eq!(registry.claim("faq"), "faq-3");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_nodes_identical_text() {
        let mut nodes = vec![
            HeadingNode::new(2, "Setup"),
            HeadingNode::new(2, "Setup"),
            HeadingNode::new(3, "Setup"),
            HeadingNode::new(2, "Setup"),
        ];

        assign_ids_to_nodes(&mut nodes, &mut HeadingRegistry::new());

        let ids: Vec<_> = nodes.iter().map(|n| n.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["setup", "setup-1", "setup-2", "setup-3"]);
    }

    #[test]
    fn test_nodes_author_id_wins() {
        let mut nodes = vec![
            HeadingNode::new(2, "Install").with_id("setup"),
            HeadingNode::new(2, "Setup"),
        ];

        assign_ids_to_nodes(&mut nodes, &mut HeadingRegistry::new());

        assert_eq!(nodes[0].id.as_deref(), Some("setup"));
        assert_eq!(nodes[1].id.as_deref(), Some("setup-1"));
    }

    #[test]
    fn test_nodes_positional_fallback() {
        let mut nodes = vec![
            HeadingNode::new(2, "Intro"),
            HeadingNode::new(2, "???"),
            HeadingNode::new(2, ""),
        ];

        assign_ids_to_nodes(&mut nodes, &mut HeadingRegistry::new());

        assert_eq!(nodes[1].id.as_deref(), Some("heading-2"));
        assert_eq!(nodes[2].id.as_deref(), Some("heading-3"));
    }

    #[test]
    fn test_assign_ids_basic() {
        let html = assign_ids("<h1>Jobs</h1>\n<p>Text</p>\n<h2>Run <code>exec</code></h2>");

        assert_eq!(
            html,
            "<h1 id=\"jobs\" data-nav-heading>Jobs</h1>\n<p>Text</p>\n\
             <h2 id=\"run-exec\" data-nav-heading>Run <code>exec</code></h2>"
        );
    }

    #[test]
    fn test_assign_ids_decodes_entities_before_slugging() {
        let html = assign_ids("<h2>C++ &amp; Rust!!</h2>");

        assert_eq!(html, r#"<h2 id="c-rust" data-nav-heading>C++ &amp; Rust!!</h2>"#);
    }

    #[test]
    fn test_assign_ids_keeps_other_attributes() {
        let html = assign_ids(r#"<h2 class="lead" id="custom">Title</h2>"#);

        assert_eq!(
            html,
            r#"<h2 id="custom" class="lead" data-nav-heading>Title</h2>"#
        );
    }

    #[test]
    fn test_assign_ids_skips_commented_out_heading() {
        let html = assign_ids("<!-- <h2>Hidden</h2> -->\n<h2>Hidden</h2>");

        assert_eq!(
            html,
            "<!-- <h2>Hidden</h2> -->\n<h2 id=\"hidden\" data-nav-heading>Hidden</h2>"
        );
    }

    #[test]
    fn test_assign_ids_quoted_angle_bracket_attribute() {
        let html = assign_ids(r#"<h2 title="a>b">X</h2>"#);

        assert_eq!(html, r#"<h2 id="x" title="a>b" data-nav-heading>X</h2>"#);
    }

    #[test]
    fn test_assign_ids_author_id_with_reference() {
        let mut registry = HeadingRegistry::new();
        let (html, headings) =
            assign_ids_with(r#"<h2 id="q&amp;a">Q</h2><h2>Q &amp; A</h2>"#, &mut registry);

        assert_eq!(
            html,
            r#"<h2 id="q&amp;a" data-nav-heading>Q</h2><h2 id="q-a" data-nav-heading>Q &amp; A</h2>"#
        );
        assert_eq!(headings[0].id, "q&a");
        assert_eq!(assign_ids(&html), html);
    }

    #[test]
    fn test_assign_ids_is_idempotent() {
        let source = "<h2>FAQ</h2><h2>FAQ</h2><h2>FAQ 1</h2><h3></h3>\
                      <h2 class=\"x\" id=\"faq\">Dup</h2><p>tail</p>";

        let once = assign_ids(source);
        let twice = assign_ids(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_assign_ids_unique_across_levels() {
        let (_, headings) = assign_ids_with(
            "<h1>Api</h1><h2>Api</h2><h4>Api</h4>",
            &mut HeadingRegistry::new(),
        );

        let ids: Vec<_> = headings.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["api", "api-1", "api-2"]);
    }

    #[test]
    fn test_assign_ids_fresh_registry_per_call() {
        let first = assign_ids("<h2>Intro</h2>");
        let second = assign_ids("<h2>Intro</h2>");

        assert_eq!(first, second);
        assert!(second.contains(r#"id="intro""#));
    }

    #[test]
    fn test_assign_ids_without_headings() {
        assert_eq!(assign_ids("<p>No headings</p>"), "<p>No headings</p>");
    }

    #[test]
    fn test_heading_serialization() {
        let heading = Heading {
            id: "install".to_owned(),
            text: "Install".to_owned(),
            level: 2,
        };

        assert_eq!(
            serde_json::to_value(&heading).unwrap(),
            serde_json::json!({"id": "install", "text": "Install", "level": 2})
        );
    }

    #[test]
    fn test_assign_ids_with_returns_headings() {
        let (_, headings) = assign_ids_with(
            "<h2>Getting Started</h2><h3>Install &amp; Run</h3>",
            &mut HeadingRegistry::new(),
        );

        assert_eq!(
            headings,
            vec![
                Heading {
                    id: "getting-started".to_owned(),
                    text: "Getting Started".to_owned(),
                    level: 2,
                },
                Heading {
                    id: "install-run".to_owned(),
                    text: "Install & Run".to_owned(),
                    level: 3,
                },
            ]
        );
    }
}
