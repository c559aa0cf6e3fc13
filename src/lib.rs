//! mccfmt - reformatter for embedded C blocks in McCode sources
//!
//! Locates `%{ ... %}` sections in instrument and component files and
//! reindents their contents, either with a builtin brace-depth engine or by
//! piping each block through clang-format. Text outside the delimiters is
//! never touched.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod block;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod process;
pub mod scan;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use process::{format_document, FormatOutcome};
