//! Configuration management for mccfmt.
//!
//! This module provides the [`Config`] struct which controls formatting
//! behavior. Configuration can be loaded from TOML files (`mccfmt.toml`)
//! and overridden by CLI arguments.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Style profile handed to clang-format.
///
/// Deliberately not user-tunable: one deterministic profile for the whole
/// tree. Google baseline, 4-space indent, no tabs, braces attached to the
/// preceding line, 80 columns, left-aligned pointers.
pub const DEFAULT_CLANG_STYLE: &str = "{BasedOnStyle: Google, IndentWidth: 4, UseTab: Never, \
     BreakBeforeBraces: Attach, ColumnLimit: 80, DerivePointerAlignment: false, \
     PointerAlignment: Left}";

// Serde default functions
fn default_indent() -> usize {
    4
}
fn default_extensions() -> Vec<String> {
    vec!["instr".to_string(), "comp".to_string()]
}
fn default_backup_suffix() -> String {
    "orig".to_string()
}
fn default_clang_style() -> String {
    DEFAULT_CLANG_STYLE.to_string()
}

/// Main configuration struct for mccfmt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indent level (default: 4). Also the extra level
    /// added to block contents relative to the delimiters.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// File extensions treated as McCode sources (default: instr, comp)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Suffix appended to a file's name for the one-time backup copy
    /// (default: "orig", producing e.g. `Monitor.comp.orig`)
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,

    /// Inline style profile passed to clang-format
    #[serde(default = "default_clang_style")]
    pub clang_style: String,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub extensions: Option<Vec<String>>,
    pub backup_suffix: Option<String>,
    pub clang_style: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: default_indent(),
            extensions: default_extensions(),
            backup_suffix: default_backup_suffix(),
            clang_style: default_clang_style(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 20;

    /// Load configuration from a TOML file, filling unset fields with defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Config::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config over this one, keeping unset fields
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(indent) = partial.indent {
            self.indent = indent;
        }
        if let Some(extensions) = &partial.extensions {
            self.extensions.clone_from(extensions);
        }
        if let Some(backup_suffix) = &partial.backup_suffix {
            self.backup_suffix.clone_from(backup_suffix);
        }
        if let Some(clang_style) = &partial.clang_style {
            self.clang_style.clone_from(clang_style);
        }
    }

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self.extensions.is_empty() {
            return Some("extensions must not be empty".to_string());
        }
        if self.backup_suffix.is_empty() {
            return Some("backup_suffix must not be empty".to_string());
        }
        if self.clang_style.is_empty() {
            return Some("clang_style must not be empty".to_string());
        }
        None
    }
}
