//! Markdown rendering with stable heading anchors.
//!
//! The pipeline for one document is:
//!
//! 1. strip the leading frontmatter block ([`strip_frontmatter`])
//! 2. convert the body with a [`Converter`] (GFM, single newline = hard break)
//! 3. give every heading a unique `id` and the `data-nav-heading` marker
//!    ([`assign_ids`])
//!
//! [`extract_toc`] reads the resulting HTML back into level 2-3 [`Heading`]s.
//!
//! # Example
//!
//! ```
//! use tome_renderer::{MarkdownRenderer, extract_toc};
//!
//! let result = MarkdownRenderer::new().render("# Guide\n\n## Install\n\n## Install\n");
//!
//! assert_eq!(result.title.as_deref(), Some("Guide"));
//! let toc = extract_toc(&result.html, "");
//! assert_eq!(toc[1].id, "install-1");
//! ```

mod convert;
mod frontmatter;
mod heading;
mod html;
mod renderer;
mod toc;

pub use convert::{CmarkConverter, ConvertError, ConvertOptions, Converter};
pub use frontmatter::{FrontMatter, split_frontmatter, strip_frontmatter};
pub use heading::{
    Heading, HeadingNode, HeadingRegistry, NAV_MARKER, assign_ids, assign_ids_to_nodes,
    assign_ids_with, slugify,
};
pub use html::{Attribute, decode_entities, parse_attributes, text_content};
pub use renderer::{MarkdownRenderer, RENDER_ERROR_FRAGMENT, RenderResult};
pub use toc::extract_toc;
