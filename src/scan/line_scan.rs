//! Per-line brace scanner.
//!
//! Counts `{` and `}` characters that appear in code position on a single
//! line. Braces inside strings, character literals and comments are
//! invisible to the caller. The scanner does no brace *matching* - it only
//! counts, which is exactly what the indenter needs.

/// Lexical state carried from one line to the next.
///
/// Only block comments span lines; string literals are considered closed at
/// the end of their line (multi-line raw strings are out of scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Plain code
    #[default]
    Code,
    /// Inside a `/* ... */` comment that has not closed yet
    BlockComment,
}

/// Result of scanning a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Count of `}` characters found in code position
    pub closers: usize,
    /// Count of `{` characters found in code position
    pub openers: usize,
    /// State to carry into the next line
    pub state: ScanState,
}

/// Lexical states local to one line.
#[derive(Clone, Copy)]
enum Lex {
    Code,
    BlockComment,
    Str { quote: u8, escaped: bool },
}

/// Scan one line (without its trailing newline) for structural braces.
///
/// A `//` sequence in code position truncates the scan: nothing after it can
/// contribute braces. A `/* ... */` pair that opens and closes on the same
/// line is skipped without carrying block-comment state forward. Inside a
/// string, a backslash escapes the next character so `"\""` does not end the
/// literal early.
#[must_use]
pub fn scan_line(line: &str, carried: ScanState) -> LineScan {
    let bytes = line.as_bytes();
    let mut lex = match carried {
        ScanState::Code => Lex::Code,
        ScanState::BlockComment => Lex::BlockComment,
    };
    let mut closers = 0;
    let mut openers = 0;
    let mut i = 0;

    while i < bytes.len() {
        match lex {
            Lex::BlockComment => {
                if bytes[i..].starts_with(b"*/") {
                    lex = Lex::Code;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            Lex::Str { quote, escaped } => {
                if escaped {
                    lex = Lex::Str {
                        quote,
                        escaped: false,
                    };
                } else if bytes[i] == b'\\' {
                    lex = Lex::Str {
                        quote,
                        escaped: true,
                    };
                } else if bytes[i] == quote {
                    lex = Lex::Code;
                }
                i += 1;
            }
            Lex::Code => {
                if bytes[i..].starts_with(b"//") {
                    // Rest of the line is a comment, stop scanning
                    break;
                }
                if bytes[i..].starts_with(b"/*") {
                    lex = Lex::BlockComment;
                    i += 2;
                    continue;
                }
                match bytes[i] {
                    b'"' | b'\'' => {
                        lex = Lex::Str {
                            quote: bytes[i],
                            escaped: false,
                        };
                    }
                    b'}' => closers += 1,
                    b'{' => openers += 1,
                    _ => {}
                }
                i += 1;
            }
        }
    }

    let state = match lex {
        Lex::BlockComment => ScanState::BlockComment,
        // Strings do not span lines; the next line starts back in code
        Lex::Code | Lex::Str { .. } => ScanState::Code,
    };

    LineScan {
        closers,
        openers,
        state,
    }
}
