//! Single-pass document formatting pipeline.

use crate::block::{locate_fragments, reassemble};
use crate::config::Config;
use crate::error::Result;
use crate::format::{CIndenter, ClangFormatter};

/// Result of formatting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// Whether any block's replacement differs from its original span
    pub changed: bool,
    /// The fully rebuilt document text
    pub text: String,
}

/// Reformat every `%{ ... %}` block in `text`.
///
/// When `clang` is `Some`, block bodies are piped through the external tool;
/// otherwise the builtin brace-depth indenter is used. The backend choice is
/// fixed for the whole run, never per block. A failure on any block aborts
/// this document and reports the error; other documents in a batch are
/// unaffected.
pub fn format_document(
    text: &str,
    config: &Config,
    clang: Option<&ClangFormatter>,
) -> Result<FormatOutcome> {
    let fragments = locate_fragments(text);
    if fragments.is_empty() {
        return Ok(FormatOutcome {
            changed: false,
            text: text.to_string(),
        });
    }

    let mut indenter = CIndenter::new(config.indent);
    let mut out = String::with_capacity(text.len());
    let mut changed = false;
    let mut cursor = 0;

    for fragment in &fragments {
        let formatted = match clang {
            Some(tool) => tool.format(fragment.body)?,
            None => indenter.reindent(fragment.body),
        };
        let replacement = reassemble(fragment.open, &formatted, fragment.close, config.indent);
        if replacement != &text[fragment.span.clone()] {
            changed = true;
        }
        out.push_str(&text[cursor..fragment.span.start]);
        out.push_str(&replacement);
        cursor = fragment.span.end;
    }
    out.push_str(&text[cursor..]);

    Ok(FormatOutcome { changed, text: out })
}
