//! Small HTML helpers shared by the heading pass and the TOC extractor.
//!
//! These operate on HTML fragments produced by the markdown converter. They
//! are not a general HTML parser: only opening tags, attributes, text content
//! and character references are understood.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

/// Attribute text of an opening tag. Quoted values may contain `>`.
pub(crate) const TAG_ATTRIBUTES: &str = r#"((?:\s(?:[^>"']|"[^"]*"|'[^']*')*)?)"#;

/// Comment, closed or running to the end of the input.
pub(crate) const COMMENT: &str = r"<!--(?:.*?-->|.*)";

/// Comment or heading element: level, attribute text, inner HTML, closing level.
///
/// The closing level is captured separately because the regex engine has no
/// backreferences; mismatched pairs are skipped by the caller. Comments match
/// first so headings inside them are never reported.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is){COMMENT}|<h([1-6]){TAG_ATTRIBUTES}>(.*?)</h([1-6])\s*>"
    ))
    .unwrap()
});

/// Single attribute inside an opening tag.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

/// Any tag or comment, used to strip markup from text content.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"(?s){COMMENT}|<(?:[^>"']|"[^"]*"|'[^']*')*>"#)).unwrap()
});

/// Character reference (named, decimal or hexadecimal).
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").unwrap());

/// Decode character references to their Unicode characters.
///
/// Unknown named references are left untouched.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }

    ENTITY_RE
        .replace_all(s, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            decoded.map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00a0}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "copy" => '\u{00a9}',
        "reg" => '\u{00ae}',
        "trade" => '\u{2122}',
        _ => return None,
    })
}

/// Plain text content of an HTML fragment: tags removed, references decoded.
#[must_use]
pub fn text_content(html: &str) -> String {
    decode_entities(&TAG_RE.replace_all(html, ""))
}

/// Attribute of an opening tag, value kept exactly as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written.
    pub name: String,
    /// Raw value (`None` for boolean attributes like `hidden`).
    pub value: Option<String>,
}

impl Attribute {
    /// Check the attribute name, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Parse the attribute portion of an opening tag (everything after the tag name).
#[must_use]
pub fn parse_attributes(source: &str) -> Vec<Attribute> {
    ATTRIBUTE_RE
        .captures_iter(source)
        .map(|caps| Attribute {
            name: caps[1].to_owned(),
            value: caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_owned()),
        })
        .collect()
}

/// Escape a decoded value for use inside a double-quoted attribute.
pub(crate) fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Append ` name="value"` (or ` name` for boolean attributes) to `out`.
pub(crate) fn write_attribute(out: &mut String, name: &str, value: Option<&str>) {
    let _ = match value {
        Some(v) if v.contains('"') => write!(out, " {name}='{v}'"),
        Some(v) => write!(out, r#" {name}="{v}""#),
        None => write!(out, " {name}"),
    };
}

/// Heading element located in an HTML fragment.
#[derive(Debug)]
pub(crate) struct HeadingElement<'a> {
    /// Byte range of the whole element in the source.
    pub range: std::ops::Range<usize>,
    /// Heading level (1-6).
    pub level: u8,
    /// Parsed attributes of the opening tag.
    pub attributes: Vec<Attribute>,
    /// Inner HTML.
    pub inner: &'a str,
}

impl HeadingElement<'_> {
    /// Decoded value of the `id` attribute, if present and non-empty.
    pub fn id(&self) -> Option<String> {
        self.attributes
            .iter()
            .find(|a| a.is("id"))
            .and_then(|a| a.value.as_deref())
            .filter(|v| !v.is_empty())
            .map(decode_entities)
    }
}

/// Find all heading elements in document order.
pub(crate) fn find_headings(html: &str) -> Vec<HeadingElement<'_>> {
    HEADING_RE
        .captures_iter(html)
        .filter(|caps| match (caps.get(1), caps.get(4)) {
            (Some(open), Some(close)) => open.as_str() == close.as_str(),
            _ => false,
        })
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let level = caps[1].parse().ok()?;
            Some(HeadingElement {
                range: whole.range(),
                level,
                attributes: parse_attributes(&caps[2]),
                inner: caps.get(3)?.as_str(),
            })
        })
        .collect()
}
