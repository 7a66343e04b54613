//! HTTP request handlers.

pub(crate) mod data;
pub(crate) mod pages;
pub(crate) mod sections;
