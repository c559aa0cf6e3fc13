//! `CIndenter` - brace-depth reindenter for embedded C code.
//!
//! Recomputes the leading whitespace of every line in a block from its
//! brace structure, one linear pass, no parse tree. Line content after the
//! leading whitespace is preserved verbatim (including trailing whitespace),
//! blank lines stay blank and keep their positions.

use crate::scan::{scan_line, ScanState};

/// Tracks indent level and comment state across the lines of one block.
pub struct CIndenter {
    /// Spaces per indent level
    indent_width: usize,
    /// Current indent level, never negative
    level: usize,
    /// Block-comment state carried between lines
    state: ScanState,
}

impl CIndenter {
    /// Create a new `CIndenter`
    ///
    /// # Arguments
    /// * `indent_width` - Number of spaces per indent level
    #[must_use]
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            level: 0,
            state: ScanState::Code,
        }
    }

    /// Reindent one block body.
    ///
    /// Each call starts from a clean state (level 0, not in a comment):
    /// blocks never share indentation state. The output has the same line
    /// count and blank-line positions as the input, and ends with a newline
    /// iff the input does.
    pub fn reindent(&mut self, code: &str) -> String {
        self.level = 0;
        self.state = ScanState::Code;

        let mut out: Vec<String> = Vec::new();
        for raw in code.lines() {
            let content = raw.trim_start();
            if content.is_empty() {
                // Blank line: emit empty, leave the level alone
                out.push(String::new());
                continue;
            }

            let scan = scan_line(raw, self.state);
            // Closers on this line pull it back out; clamp at column 0
            let rendered = self.level.saturating_sub(scan.closers);

            let mut line = " ".repeat(rendered * self.indent_width);
            line.push_str(content);
            out.push(line);

            self.level = rendered + scan.openers;
            self.state = scan.state;
        }

        let mut result = out.join("\n");
        if code.ends_with('\n') {
            result.push('\n');
        }
        result
    }

    /// Indent level after the last processed line
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reindent(code: &str) -> String {
        CIndenter::new(4).reindent(code)
    }

    #[test]
    fn test_simple_if_block() {
        let input = "if (x) {\ny();\n}";
        assert_eq!(reindent(input), "if (x) {\n    y();\n}");
    }

    #[test]
    fn test_nested_blocks() {
        let input = "if (a) {\nif (b) {\nx = 1;\n}\ny = 2;\n}";
        let expected = "if (a) {\n    if (b) {\n        x = 1;\n    }\n    y = 2;\n}";
        assert_eq!(reindent(input), expected);
    }

    #[test]
    fn test_idempotence() {
        let input = "if (a) {\n  while (b) {\nc();\n}\n}\n";
        let once = reindent(input);
        let twice = reindent(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clamp_at_zero() {
        // Excess closers clamp at column 0, no negative carry-over
        let input = "}}code\nnext;";
        assert_eq!(reindent(input), "}}code\nnext;");
    }

    #[test]
    fn test_blank_lines_preserved() {
        let input = "if (x) {\n\na();\n   \nb();\n}";
        let output = reindent(input);
        assert_eq!(output, "if (x) {\n\n    a();\n\n    b();\n}");
        assert_eq!(output.lines().count(), input.lines().count());
    }

    #[test]
    fn test_braces_in_strings_do_not_indent() {
        let input = "s = \"{\";\nt = 1;";
        assert_eq!(reindent(input), "s = \"{\";\nt = 1;");
    }

    #[test]
    fn test_braces_in_comments_do_not_indent() {
        let input = "// {\nx = 1;\n/* { */\ny = 2;";
        assert_eq!(reindent(input), "// {\nx = 1;\n/* { */\ny = 2;");
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        // Braces inside a multi-line comment must not change levels
        let input = "if (x) {\n/* comment {\nstill comment }\n*/\ny();\n}";
        let expected = "if (x) {\n    /* comment {\n    still comment }\n    */\n    y();\n}";
        assert_eq!(reindent(input), expected);
    }

    #[test]
    fn test_trailing_newline_preserved() {
        assert_eq!(reindent("x;\n"), "x;\n");
        assert_eq!(reindent("x;"), "x;");
    }

    #[test]
    fn test_trailing_whitespace_in_content_kept() {
        // Only leading whitespace is recomputed
        let input = "if (x) {\ny();   \n}";
        assert_eq!(reindent(input), "if (x) {\n    y();   \n}");
    }

    #[test]
    fn test_close_and_reopen_same_line() {
        let input = "if (a) {\nx;\n} else {\ny;\n}";
        let expected = "if (a) {\n    x;\n} else {\n    y;\n}";
        assert_eq!(reindent(input), expected);
    }

    #[test]
    fn test_state_reset_between_calls() {
        let mut indenter = CIndenter::new(4);
        // Leaves the indenter at level 1 and inside a comment
        indenter.reindent("if (x) {\n/* open");
        assert_eq!(indenter.level(), 1);
        // Next block starts fresh
        assert_eq!(indenter.reindent("a;\nb;"), "a;\nb;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reindent(""), "");
    }

    #[test]
    fn test_custom_indent_width() {
        let mut indenter = CIndenter::new(2);
        assert_eq!(indenter.reindent("{\nx;\n}"), "{\n  x;\n}");
    }
}
