//! Table of contents extraction from rendered HTML.
//!
//! Reads headings of levels 2-3 inside a container selected by a minimal
//! selector (`tag`, `.class`, `#id`, or empty for the whole fragment). Ids are
//! taken as they appear in the markup; nothing is recomputed.

use std::sync::LazyLock;

use regex::Regex;

use crate::heading::Heading;
use crate::html::{COMMENT, TAG_ATTRIBUTES, find_headings, parse_attributes, text_content};

/// Comment or opening tag: name and attribute text.
static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s){COMMENT}|<([a-zA-Z][a-zA-Z0-9-]*){TAG_ATTRIBUTES}>"
    ))
    .unwrap()
});

/// Shallowest and deepest heading levels included in the TOC.
const TOC_LEVELS: std::ops::RangeInclusive<u8> = 2..=3;

/// Parsed container selector.
#[derive(Debug, PartialEq, Eq)]
enum Selector<'a> {
    All,
    Tag(&'a str),
    Class(&'a str),
    Id(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Some(Self::All);
        }

        let parsed = if let Some(class) = selector.strip_prefix('.') {
            Self::Class(class)
        } else if let Some(id) = selector.strip_prefix('#') {
            Self::Id(id)
        } else {
            Self::Tag(selector)
        };

        let name = match parsed {
            Self::Tag(n) | Self::Class(n) | Self::Id(n) => n,
            Self::All => "",
        };
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(parsed)
    }

    fn matches(&self, tag: &str, attributes: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(name) => tag.eq_ignore_ascii_case(name),
            Self::Class(class) => parse_attributes(attributes).iter().any(|a| {
                a.is("class")
                    && a.value
                        .as_deref()
                        .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == *class))
            }),
            Self::Id(id) => parse_attributes(attributes)
                .iter()
                .any(|a| a.is("id") && a.value.as_deref() == Some(*id)),
        }
    }
}

/// Extract level 2-3 headings inside the first element matching `selector`.
///
/// Returns an empty list if the selector matches nothing or is not one of
/// the supported forms. Headings without an `id` get an empty id.
///
/// # Examples
///
/// ```
/// use tome_renderer::extract_toc;
///
/// let html = r#"<nav><h2 id="x">Skip</h2></nav><main><h1 id="t">T</h1><h2 id="a">A</h2></main>"#;
/// let toc = extract_toc(html, "main");
///
/// assert_eq!(toc.len(), 1);
/// assert_eq!(toc[0].id, "a");
/// ```
#[must_use]
pub fn extract_toc(html: &str, selector: &str) -> Vec<Heading> {
    let Some(selector) = Selector::parse(selector) else {
        tracing::debug!(selector, "Unsupported TOC selector");
        return Vec::new();
    };

    let Some(region) = select_region(html, &selector) else {
        return Vec::new();
    };

    find_headings(region)
        .into_iter()
        .filter(|el| TOC_LEVELS.contains(&el.level))
        .map(|el| Heading {
            id: el.id().unwrap_or_default(),
            text: text_content(el.inner).trim().to_owned(),
            level: el.level,
        })
        .collect()
}

/// Inner HTML of the first element matching `selector`.
fn select_region<'a>(html: &'a str, selector: &Selector<'_>) -> Option<&'a str> {
    if *selector == Selector::All {
        return Some(html);
    }

    let open = OPEN_TAG_RE
        .captures_iter(html)
        .find(|caps| {
            caps.get(1)
                .is_some_and(|tag| selector.matches(tag.as_str(), &caps[2]))
        })?;
    let whole = open.get(0)?;
    let start = whole.end();
    let end = closing_tag_start(html, start, &open[1]).unwrap_or(html.len());
    Some(&html[start..end])
}

/// Byte offset of the tag closing an element whose content starts at `from`.
///
/// Nested elements with the same name are balanced; returns `None` when the
/// element is never closed.
fn closing_tag_start(html: &str, from: usize, tag: &str) -> Option<usize> {
    let pattern = format!(
        r"(?is){COMMENT}|<(/?){}\b{TAG_ATTRIBUTES}>",
        regex::escape(tag)
    );
    let tag_re = Regex::new(&pattern).ok()?;

    let mut depth = 1usize;
    for caps in tag_re.captures_iter(&html[from..]) {
        let Some(slash) = caps.get(1) else {
            continue;
        };
        let m = caps.get(0)?;
        if slash.as_str().is_empty() {
            if !m.as_str().ends_with("/>") {
                depth += 1;
            }
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(from + m.start());
            }
        }
    }
    None
}
