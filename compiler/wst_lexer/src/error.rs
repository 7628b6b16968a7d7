//! Lexer error types.
//!
//! A [`LexError`] carries WHERE (line and column), WHAT ([`LexErrorKind`])
//! and, for character-level failures, a rendered context snippet that
//! points at the offending column:
//!
//! ```text
//! illegal character '@', line 3, column 6
//!   3  <p></@p>
//!      ----^
//! ```

use std::fmt;

/// A lexer error with its source position.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}, line {line}, column {column}{}", ContextBlock(.context.as_deref()))]
pub struct LexError {
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// 1-based source line.
    pub line: u32,
    /// 1-based column, counted in chars.
    pub column: u32,
    /// Rendered snippet of the offending line, if one applies.
    pub context: Option<String>,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A character that is not allowed in the current lexer state.
    #[error("illegal character {0:?}")]
    IllegalCharacter(char),
    /// `<!--` without a matching `-->` before end of input.
    #[error("unclosed comment")]
    UnclosedComment,
    /// A quoted or brace-delimited attribute value never closed.
    #[error("unbalanced quote or curly brace in `{lexeme}`")]
    UnbalancedQuote { lexeme: String },
    /// A tag or closing tag still open at end of input.
    #[error("unterminated tag")]
    UnterminatedTag,
    /// A `<script>`/`<style>` element whose closing tag never appears.
    #[error("unterminated <{tag}> element")]
    UnterminatedRawText { tag: String },
    /// A line indented with spaces instead of tabs.
    #[error("line is indented with spaces; only tabs are supported (run `wst fix-indent` to convert)")]
    SpaceIndentation,
}

impl LexError {
    /// Create an error without a context snippet.
    pub fn new(kind: LexErrorKind, line: u32, column: u32) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Create an illegal-character error with a rendered context snippet.
    pub fn illegal_character(c: char, line: u32, column: u32, source_line: &str) -> Self {
        Self {
            kind: LexErrorKind::IllegalCharacter(c),
            line,
            column,
            context: Some(render_context(source_line, line, column)),
        }
    }
}

/// Number of chars shown on each side of the column in a clipped snippet.
const CONTEXT_RADIUS: usize = 25;

/// Lines longer than this (up to the error column) are clipped.
const CLIP_AFTER: u32 = 49;

/// Render a one-line snippet with a caret under `column`.
///
/// Whitespace control characters are flattened to spaces so the caret stays
/// aligned. When the column lies far into the line, the snippet is clipped
/// to the surrounding [`CONTEXT_RADIUS`] chars and wrapped in ellipses.
pub fn render_context(source_line: &str, line: u32, column: u32) -> String {
    let flat: Vec<char> = source_line
        .trim_end_matches(['\n', '\r'])
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let col = column as usize;
    let (shown, caret_col) = if column > CLIP_AFTER {
        let start = col.saturating_sub(CONTEXT_RADIUS).min(flat.len());
        let end = (col + CONTEXT_RADIUS).min(flat.len());
        let mid: String = flat[start..end].iter().collect();
        // "... " prefix shifts the caret by four columns
        (format!("... {mid} ..."), col - start + 4)
    } else {
        (flat.iter().collect(), col)
    };

    let gutter = line.to_string();
    let pad = " ".repeat(gutter.len());
    let dashes = "-".repeat(caret_col.saturating_sub(1));
    format!("  {gutter}  {shown}\n  {pad}  {dashes}^")
}

/// Display adapter that prints a context snippet on its own lines.
struct ContextBlock<'a>(Option<&'a str>);

impl fmt::Display for ContextBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(context) => write!(f, "\n{context}"),
            None => Ok(()),
        }
    }
}
