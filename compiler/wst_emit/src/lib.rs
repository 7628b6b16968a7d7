//! Code output for the WST transcriber.
//!
//! Generated JavaScript is collected as lines in a [`Code`] buffer, which
//! derives block indentation from the lines themselves, then rendered
//! through an [`Emitter`] either indented or minified.
//!
//! # Modules
//!
//! - [`code`]: the line buffer and its indentation heuristic
//! - [`emitter`]: output abstraction for string and writer output

pub mod code;
pub mod emitter;

pub use code::Code;
pub use emitter::{Emitter, IndentStyle, StringEmitter, WriterEmitter};
