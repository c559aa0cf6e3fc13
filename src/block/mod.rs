//! Locating and rebuilding `%{ ... %}` blocks.
//!
//! The locator finds every delimited block in a document; the reassembler
//! turns a formatted body back into the exact replacement text between the
//! original delimiter lines.

pub mod locator;
pub mod reassemble;

pub use locator::{locate_fragments, Fragment};
pub use reassemble::reassemble;
