//! Slug resolution, content loading and document rendering for Tome.
//!
//! This crate provides:
//! - [`SlugResolver`]: ordered fallback conventions from slug to storage key
//! - [`ContentLoader`]: resolution plus registry read, with distinct
//!   not-found and internal errors
//! - [`Site`]: sections over a shared registry, rendering documents
//! - [`SiteData`] and [`stamp_version`]: navigation data in the data directory
//! - [`build_site`]: static export of every document
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tome_registry::MapRegistry;
//! use tome_site::Site;
//!
//! let registry = MapRegistry::new()
//!     .with_document("markdown/introduction.md", "# Introduction\n\n## Install\n");
//! let site = Site::new(Arc::new(registry));
//!
//! let doc = site.render("docs", "", "/docs").unwrap();
//! assert_eq!(doc.slug, "introduction");
//! assert_eq!(doc.toc[0].id, "install");
//! ```

mod build;
mod data;
mod loader;
mod resolver;
mod section;
mod site;

pub use build::{BuildError, BuildReport, build_site};
pub use data::{DataError, SiteData, VersionInfo, stamp_version};
pub use loader::{ContentLoader, LoadError, LoadedDocument};
pub use resolver::{NotFound, PRIMARY_EXTENSION, SlugResolver, normalize_slug};
pub use section::{Section, default_sections};
pub use site::{RenderedDocument, Site};

// Re-export Heading from tome-renderer for convenience
pub use tome_renderer::Heading;
