//! Document rendering pipeline.

use crate::convert::{CmarkConverter, ConvertOptions, Converter};
use crate::frontmatter::{FrontMatter, split_frontmatter};
use crate::heading::{Heading, HeadingRegistry, assign_ids_with};

/// Fragment returned in place of a document that failed to convert.
pub const RENDER_ERROR_FRAGMENT: &str = "<p>Error parsing content</p>";

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML with heading anchors.
    pub html: String,
    /// Title from frontmatter, or the first H1 heading.
    pub title: Option<String>,
    /// Level 2-3 headings in document order.
    pub toc: Vec<Heading>,
    /// Warnings generated while rendering.
    pub warnings: Vec<String>,
}

/// Markdown renderer: frontmatter stripping, conversion and heading anchors.
///
/// The renderer holds no per-document state; every call to
/// [`render`](Self::render) uses its own [`HeadingRegistry`].
///
/// # Example
///
/// ```
/// use tome_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new().render("---\ntitle: Guide\n---\n## Setup\n");
///
/// assert_eq!(result.title.as_deref(), Some("Guide"));
/// assert_eq!(result.html, "<h2 id=\"setup\" data-nav-heading>Setup</h2>\n");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer<C: Converter = CmarkConverter> {
    converter: C,
    options: ConvertOptions,
}

impl MarkdownRenderer {
    /// Create a renderer using `pulldown-cmark` with GFM and hard breaks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Converter> MarkdownRenderer<C> {
    /// Create a renderer with a custom conversion backend.
    #[must_use]
    pub fn with_converter(converter: C) -> Self {
        Self {
            converter,
            options: ConvertOptions::default(),
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.options.gfm = enabled;
        self
    }

    /// Enable or disable rendering single newlines as line breaks.
    #[must_use]
    pub fn with_hard_breaks(mut self, enabled: bool) -> Self {
        self.options.hard_breaks = enabled;
        self
    }

    /// Conversion options in effect.
    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Render a raw document.
    ///
    /// Conversion failures never propagate: the HTML is replaced by
    /// [`RENDER_ERROR_FRAGMENT`] and the failure is reported as a warning.
    pub fn render(&self, raw: &str) -> RenderResult {
        let (metadata, body) = split_frontmatter(raw);
        let meta = metadata.and_then(FrontMatter::parse).unwrap_or_default();

        let converted = match self.converter.convert(&body, &self.options) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to convert markdown");
                return RenderResult {
                    html: RENDER_ERROR_FRAGMENT.to_owned(),
                    title: meta.title,
                    toc: Vec::new(),
                    warnings: vec![e.to_string()],
                };
            }
        };

        let mut registry = HeadingRegistry::new();
        let (html, headings) = assign_ids_with(&converted, &mut registry);

        let title = meta.title.or_else(|| {
            headings
                .iter()
                .find(|h| h.level == 1)
                .map(|h| h.text.clone())
        });
        let toc = headings
            .into_iter()
            .filter(|h| (2..=3).contains(&h.level))
            .collect();

        RenderResult {
            html,
            title,
            toc,
            warnings: Vec::new(),
        }
    }

    /// Render a raw document to HTML only.
    #[must_use]
    pub fn render_html(&self, raw: &str) -> String {
        self.render(raw).html
    }
}
