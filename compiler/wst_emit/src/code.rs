//! Line buffer with automatic block indentation.
//!
//! [`Code`] collects statements one line at a time and tracks the block
//! depth from the lines themselves: a line ending in `{` opens a block, a
//! line starting with `}` closes one, and `} else {` does both. Depth is
//! stored per line, so rendering can switch between indented and minified
//! output without re-walking anything.
//!
//! Minified output concatenates lines, except that lines pushed with
//! [`Code::push_verbatim`] keep their trailing line break.

use std::io::{self, Write};

use crate::emitter::{Emitter, IndentStyle, StringEmitter, WriterEmitter};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Line {
    depth: usize,
    text: String,
    /// User-written line; minified output still ends it with a line break.
    verbatim: bool,
}

/// Ordered lines of generated code.
#[derive(Clone, Debug, Default)]
pub struct Code {
    lines: Vec<Line>,
    depth: usize,
    style: IndentStyle,
    minify: bool,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit used by non-minified rendering.
    #[must_use]
    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.style = style;
        self
    }

    /// Render minified: blank lines dropped, lines trimmed and concatenated.
    #[must_use]
    pub fn minified(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Append one line, adjusting depth around block delimiters.
    ///
    /// Surrounding whitespace is trimmed; indentation comes from the depth.
    pub fn push_line(&mut self, line: impl AsRef<str>) {
        self.push(line.as_ref(), false);
    }

    fn push(&mut self, line: &str, verbatim: bool) {
        let text = line.trim();
        if text.starts_with('}') {
            self.dedent();
        }
        self.lines.push(Line {
            depth: self.depth,
            text: text.to_owned(),
            verbatim,
        });
        if text.ends_with('{') {
            self.indent();
        }
    }

    /// Append a multi-line body written by the user, such as an event
    /// callback.
    ///
    /// Blank lines are skipped. Depth after the body is what it was before,
    /// so unbalanced braces in the body cannot skew the surrounding code.
    /// Minified output keeps the line break after each body line: a `//`
    /// comment must not swallow what follows, and statements split only by
    /// a newline must stay split.
    pub fn push_verbatim(&mut self, body: &str) {
        let depth = self.depth;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            self.push(line, true);
        }
        self.depth = depth;
    }

    /// Append every line of `other`, nested at the current depth.
    pub fn push_all(&mut self, other: &Code) {
        self.lines.extend(other.lines.iter().map(|line| Line {
            depth: self.depth + line.depth,
            text: line.text.clone(),
            verbatim: line.verbatim,
        }));
    }

    /// Open a block the line heuristic cannot see.
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Close a block the line heuristic cannot see. Never goes below zero.
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current block depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The stored lines, without indentation.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Render into `emitter`.
    pub fn emit(&self, emitter: &mut impl Emitter) {
        if self.minify {
            for line in self.lines.iter().filter(|l| !l.text.is_empty()) {
                emitter.emit(&line.text);
                if line.verbatim {
                    emitter.emit_newline();
                }
            }
            return;
        }
        for line in &self.lines {
            if !line.text.is_empty() {
                emitter.emit_indent(line.depth, self.style);
                emitter.emit(&line.text);
            }
            emitter.emit_newline();
        }
    }

    /// Render to a string.
    pub fn render(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.text.len() + l.depth + 1).sum();
        let mut emitter = StringEmitter::with_capacity(capacity);
        self.emit(&mut emitter);
        emitter.output()
    }

    /// Stream the rendered code into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut emitter = WriterEmitter::new(writer);
        self.emit(&mut emitter);
        emitter.finish()
    }
}

#[cfg(test)]
mod tests;
