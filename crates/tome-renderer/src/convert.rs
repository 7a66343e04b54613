//! Markdown to HTML conversion backends.

use pulldown_cmark::{Event, Options, Parser, html};

/// Error raised by a [`Converter`].
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input exceeds the configured size limit.
    #[error("document is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    /// Backend-specific failure.
    #[error("conversion failed: {0}")]
    Backend(String),
}

/// Conversion flags shared by all backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// GitHub Flavored Markdown extensions (tables, strikethrough, task lists, alerts).
    pub gfm: bool,
    /// Render single newlines inside paragraphs as `<br />`.
    pub hard_breaks: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            hard_breaks: true,
        }
    }
}

impl ConvertOptions {
    /// Parser options for these flags.
    ///
    /// `{#custom-id}` heading attributes are always enabled.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let base = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            base | Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            base
        }
    }
}

/// Markdown to HTML converter.
///
/// Implementations must be pure: the same input and options always produce
/// the same output.
pub trait Converter: Send + Sync {
    /// Convert a markdown body (frontmatter already removed) to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if the body cannot be converted.
    fn convert(&self, markdown: &str, options: &ConvertOptions) -> Result<String, ConvertError>;
}

/// [`Converter`] backed by `pulldown-cmark`.
#[derive(Clone, Debug, Default)]
pub struct CmarkConverter {
    max_input_bytes: Option<usize>,
}

impl CmarkConverter {
    /// Create a converter without an input size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents larger than `limit` bytes.
    #[must_use]
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }
}

impl Converter for CmarkConverter {
    fn convert(&self, markdown: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
        if let Some(limit) = self.max_input_bytes
            && markdown.len() > limit
        {
            return Err(ConvertError::TooLarge {
                size: markdown.len(),
                limit,
            });
        }

        let hard_breaks = options.hard_breaks;
        let parser = Parser::new_ext(markdown, options.parser_options()).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}
