//! Command handlers for the `wst` CLI.
//!
//! Each submodule parses its own arguments and returns whether the command
//! succeeded; `main` turns that into the exit code.

mod fix_indent;
mod lex;
mod transcribe;

pub use fix_indent::run_fix_indent;
pub use lex::lex_file;
pub use transcribe::{parse_transcribe_args, run_transcribe, TranscribeArgs};

