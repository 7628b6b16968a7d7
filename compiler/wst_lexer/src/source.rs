//! Source preparation ahead of lexing.
//!
//! [`SourceText`] owns the file contents split into lines. Each line keeps
//! its `\n` terminator so a tag or comment that spans lines still sees the
//! line break, exactly as the markup lexer consumes it.
//!
//! # Checks
//!
//! - A leading UTF-8 BOM is stripped.
//! - Indentation must use tabs. A line that starts with a space and has
//!   visible content is rejected with [`LexErrorKind::SpaceIndentation`];
//!   whitespace-only lines are accepted.

use crate::error::{LexError, LexErrorKind};

/// UTF-8 byte order mark.
const UTF8_BOM: char = '\u{FEFF}';

/// Source text split into newline-terminated lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Split `text` into lines and validate indentation.
    pub fn new(text: &str) -> Result<Self, LexError> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let mut lines = Vec::new();
        for (index, line) in text.split_inclusive('\n').enumerate() {
            if line.starts_with(' ') && !line.trim().is_empty() {
                return Err(LexError::new(
                    LexErrorKind::SpaceIndentation,
                    line_number(index),
                    1,
                ));
            }
            lines.push(line.to_owned());
        }
        Ok(Self { lines })
    }

    /// Lines paired with their 1-based line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| (line_number(index), line.as_str()))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` for an empty file.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "source files beyond u32::MAX lines are not supported"
)]
fn line_number(index: usize) -> u32 {
    index as u32 + 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap known-good sources")]
mod tests;
