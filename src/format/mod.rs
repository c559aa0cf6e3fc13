//! Fragment formatting backends.
//!
//! Two mutually exclusive ways to reformat a block body:
//! - [`CIndenter`]: builtin brace-depth reindenter, used when no external
//!   tool is configured
//! - [`ClangFormatter`]: pipes the body through a clang-format executable
//!   with a fixed style profile

pub mod clang;
pub mod indenter;

pub use clang::ClangFormatter;
pub use indenter::CIndenter;
