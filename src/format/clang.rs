//! External clang-format adapter.
//!
//! Pipes a block body through a clang-format executable configured with a
//! fixed style profile. A non-zero exit status is a hard failure carrying
//! the tool's stderr; there is no fallback to the builtin indenter.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context};

use crate::error::Result;

/// Adapter around an external clang-format executable.
pub struct ClangFormatter {
    /// Path to the executable
    program: PathBuf,
    /// Inline style profile passed via `-style=...`
    style: String,
}

impl ClangFormatter {
    /// Create a new `ClangFormatter`
    ///
    /// # Arguments
    /// * `program` - Path to the clang-format executable
    /// * `style` - Inline style profile (see [`crate::config::DEFAULT_CLANG_STYLE`])
    #[must_use]
    pub fn new(program: impl AsRef<Path>, style: impl Into<String>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            style: style.into(),
        }
    }

    /// Format `code` by piping it through the external tool.
    pub fn format(&self, code: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .arg(format!("-style={}", self.style))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch {}", self.program.display()))?;

        // Scope the handle so stdin is closed before waiting on output,
        // also on the error path
        {
            let mut stdin = child
                .stdin
                .take()
                .context("clang-format stdin unavailable")?;
            stdin
                .write_all(code.as_bytes())
                .context("failed to write to clang-format stdin")?;
        }

        let output = child
            .wait_with_output()
            .context("failed to read clang-format output")?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr);
            bail!("clang-format failed: {}", diagnostic.trim());
        }

        String::from_utf8(output.stdout).context("clang-format produced non-UTF-8 output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_an_error() {
        let formatter = ClangFormatter::new("/nonexistent/clang-format", "{BasedOnStyle: Google}");
        let result = formatter.format("int main() {}\n");
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("failed to launch"));
    }

    #[test]
    fn test_nonzero_exit_is_an_error() {
        // `false` exits 1 without reading stdin; empty input keeps the
        // stdin write from failing first so the exit status is what errors
        let formatter = ClangFormatter::new("false", "{}");
        let result = formatter.format("");
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("clang-format failed"));
    }
}
