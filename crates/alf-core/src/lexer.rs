//! Directive lexer: splits a `LogFormat` string into literal text and `%` directives.
//!
//! A directive starts at `%` and runs up to the first terminal type letter
//! seen outside braces. Everything in between (`{key}` spans, `>` / `<`
//! modifiers, `!200,304` condition lists) is kept verbatim in the directive's
//! raw segment; deciding what it means is the compiler's job.
//!
//! In literal text a backslash escapes the next character, so formats pasted
//! from an Apache configuration file (`\"%r\"`) read the same as unescaped ones.

use crate::error::{Error, Result};

/// Every letter that terminates a directive. `%` itself is the literal-percent directive.
pub const TERMINAL_LETTERS: &str = "%aAbBCDefhHilmnopPqrstTuUvVXIO";

/// One lexical unit of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unescaped literal text.
    Literal(String),
    /// `%<raw><letter>`, where `offset` is the byte offset of the `%`.
    Directive {
        letter: char,
        raw: String,
        offset: usize,
    },
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Literal,
    Directive { start: usize },
    Braced { start: usize },
}

pub fn is_terminal(c: char) -> bool {
    TERMINAL_LETTERS.contains(c)
}

/// Tokenize a format string.
///
/// Fails with [`Error::UnterminatedDirective`] when the string ends inside a
/// directive (a trailing `%`, an unclosed `{`, or no terminal letter).
pub fn tokenize(format: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut raw = String::new();
    let mut mode = Mode::Literal;
    let mut chars = format.char_indices();

    while let Some((offset, c)) = chars.next() {
        match mode {
            Mode::Literal => match c {
                '%' => {
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    mode = Mode::Directive { start: offset };
                }
                '\\' => match chars.next() {
                    Some((_, 't')) => literal.push('\t'),
                    Some((_, escaped)) => literal.push(escaped),
                    None => literal.push('\\'),
                },
                _ => literal.push(c),
            },
            Mode::Directive { start } if is_terminal(c) => {
                tokens.push(Token::Directive {
                    letter: c,
                    raw: std::mem::take(&mut raw),
                    offset: start,
                });
                mode = Mode::Literal;
            }
            Mode::Directive { start } => {
                if c == '{' {
                    mode = Mode::Braced { start };
                }
                raw.push(c);
            }
            Mode::Braced { start } => {
                if c == '}' {
                    mode = Mode::Directive { start };
                }
                raw.push(c);
            }
        }
    }

    match mode {
        Mode::Literal => {
            if !literal.is_empty() {
                tokens.push(Token::Literal(literal));
            }
            Ok(tokens)
        }
        Mode::Directive { start } | Mode::Braced { start } => {
            Err(Error::UnterminatedDirective { offset: start })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
