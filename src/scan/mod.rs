//! Line-level lexical scanning of C-like code.
//!
//! The scanner is the foundation of the builtin indenter: it walks one line
//! at a time and counts the braces that are structurally significant,
//! ignoring anything inside string literals, character literals, `//` line
//! comments and `/* */` block comments. Block-comment state is carried
//! between lines explicitly via [`ScanState`].

pub mod line_scan;

pub use line_scan::{scan_line, LineScan, ScanState};
