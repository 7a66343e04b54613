//! Content registry abstraction for Tome.
//!
//! A registry maps **storage keys** to raw document text. Keys are `/`-separated
//! paths relative to the content root and include the file extension:
//!
//! - `"markdown/introduction.md"`
//! - `"markdown/metrics/index.md"`
//! - `"markdown/api/overview.md"`
//!
//! The registry is built once per process (or once per build) and is read-only
//! afterwards, so it can be shared behind an `Arc` without locking.
//!
//! # Backends
//!
//! - [`FsRegistry`] reads documents from the content tree on demand
//! - [`MapRegistry`] holds a precompiled key → content map, typically produced
//!   by [`Snapshot::capture`] at build time and loaded from JSON at startup
//!
//! # Example
//!
//! ```
//! use tome_registry::{ContentRegistry, MapRegistry};
//!
//! let registry = MapRegistry::new()
//!     .with_document("markdown/introduction.md", "# Introduction");
//!
//! assert!(registry.contains("markdown/introduction.md"));
//! assert_eq!(registry.read("markdown/introduction.md").unwrap(), "# Introduction");
//! ```

mod fs;
mod map;
mod registry;
mod scan;

pub use fs::FsRegistry;
pub use map::{MapRegistry, Snapshot};
pub use registry::{ContentRegistry, RegistryError, RegistryErrorKind, validate_key};
pub use scan::{DEFAULT_PATTERNS, scan_keys};
