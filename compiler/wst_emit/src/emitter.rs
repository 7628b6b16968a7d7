//! Output Emitter
//!
//! Abstraction for the destination of rendered code.
//! Supports string building for in-memory rendering and streaming to any
//! `io::Write` sink.

use std::io::{self, BufWriter, Write};

/// Unit of indentation written per depth level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndentStyle {
    /// One tab per level.
    #[default]
    Tabs,
    /// Four spaces per level.
    Spaces,
}

impl IndentStyle {
    /// Text written for one level.
    pub fn unit(self) -> &'static str {
        match self {
            IndentStyle::Tabs => "\t",
            IndentStyle::Spaces => "    ",
        }
    }
}

/// Trait for emitting rendered output.
///
/// [`Code`](crate::Code) writes to an emitter during rendering.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self) {
        self.emit("\n");
    }

    /// Emit `level` units of indentation.
    fn emit_indent(&mut self, level: usize, style: IndentStyle) {
        for _ in 0..level {
            self.emit(style.unit());
        }
    }
}

/// String-based emitter for in-memory rendering.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the rendered output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Buffered emitter streaming into any writer.
///
/// The first write error is kept and reported by [`finish`](Self::finish);
/// later writes are skipped.
pub struct WriterEmitter<W: Write> {
    writer: BufWriter<W>,
    error: Option<io::Error>,
}

impl<W: Write> WriterEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            error: None,
        }
    }

    /// Flush buffered output and return the first error encountered.
    ///
    /// # Errors
    ///
    /// Returns the first failed write, or a failure of the final flush.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()
    }
}

impl<W: Write> Emitter for WriterEmitter<W> {
    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.writer.write_all(text.as_bytes()) {
            self.error = Some(err);
        }
    }
}
