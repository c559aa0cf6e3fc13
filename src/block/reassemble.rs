//! Fragment reassembly.
//!
//! Rebuilds the on-disk text for one block from its formatted body: strips
//! incidental blank lines at either end, pushes every remaining line one
//! indent level deeper (block contents are first-level code relative to the
//! document), and puts the body back between the untouched delimiter lines.

/// Build the replacement text for one block.
///
/// `open` is the opening delimiter line including its newline; `close` is
/// the closing delimiter line without a leading newline. An all-blank body
/// collapses to the two delimiter lines with nothing between them.
#[must_use]
pub fn reassemble(open: &str, formatted: &str, close: &str, indent_width: usize) -> String {
    let lines: Vec<&str> = formatted.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return format!("{open}{close}");
    };

    let prefix = " ".repeat(indent_width);
    let body: Vec<String> = lines[first..=last]
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect();

    format!("{open}{}\n{close}", body.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_body() {
        let result = reassemble("%{\n", "int x;", "%}", 4);
        assert_eq!(result, "%{\n    int x;\n%}");
    }

    #[test]
    fn test_extra_level_on_every_line() {
        let result = reassemble("%{\n", "if (x) {\n    y();\n}", "%}", 4);
        assert_eq!(result, "%{\n    if (x) {\n        y();\n    }\n%}");
    }

    #[test]
    fn test_empty_body_no_blank_line() {
        // All-whitespace bodies collapse to adjacent delimiter lines
        assert_eq!(reassemble("%{\n", "", "%}", 4), "%{\n%}");
        assert_eq!(reassemble("%{\n", "\n\n", "%}", 4), "%{\n%}");
        assert_eq!(reassemble("%{\n", "   \n\t\n", "%}", 4), "%{\n%}");
    }

    #[test]
    fn test_leading_and_trailing_blank_lines_stripped() {
        let result = reassemble("%{\n", "\n\nx;\n\n", "%}", 4);
        assert_eq!(result, "%{\n    x;\n%}");
    }

    #[test]
    fn test_interior_blank_lines_kept_empty() {
        let result = reassemble("%{\n", "a;\n   \nb;", "%}", 4);
        assert_eq!(result, "%{\n    a;\n\n    b;\n%}");
    }

    #[test]
    fn test_delimiters_kept_verbatim() {
        let result = reassemble("  %{  \n", "x;", "\t%}\t", 2);
        assert_eq!(result, "  %{  \n  x;\n\t%}\t");
    }

    #[test]
    fn test_trailing_newline_on_formatted_body_absorbed() {
        // clang-format output ends with a newline; it must not double up
        let result = reassemble("%{\n", "x;\n", "%}", 4);
        assert_eq!(result, "%{\n    x;\n%}");
    }
}
