//! Per-document orchestration.
//!
//! Runs the locator over one document, reformats each block body with the
//! selected backend, reassembles the replacements and reports whether the
//! document changed. The caller decides whether to persist the result.

pub mod pipeline;

pub use pipeline::{format_document, FormatOutcome};
