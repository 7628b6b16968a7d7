//! WST transcriber: static markup to DOM-building JavaScript.
//!
//! # Pipeline
//!
//! ```text
//! text ─► SourceText ─► MarkupLexer ─► coalesce ─► strip_doctype
//!      ─► TagLexer per tag ─► Vec<Node> ─► Transcriber ─► Code
//! ```
//!
//! [`transcribe_source`] runs the whole pipeline for one file. Each call
//! builds its own lexers and transcriber, so files can be transcribed on
//! separate threads.
//!
//! # Modules
//!
//! - [`config`]: target configuration and per-file options
//! - [`coalesce`]: data-token merging
//! - [`stream`]: DOCTYPE check and node conversion
//! - [`transcriber`]: the stack-based statement generator
//! - [`js`]: JavaScript literal and identifier helpers
//! - [`vocab`]: void elements and DOM event names
//! - [`error`]: error taxonomy

use std::ffi::OsStr;
use std::path::Path;

use wst_emit::Code;
use wst_lexer::{MarkupLexer, SourceText, TagLexer};

pub mod coalesce;
pub mod config;
pub mod entity;
pub mod error;
pub mod js;
pub mod stream;
pub mod transcriber;
pub mod vocab;

pub use config::{
    Behavior, FileOptions, FileSelection, Parameters, ReplacementIds, TargetConfig,
};
pub use error::{ConfigError, ErrorKind, StructuralError, TranscribeError};
pub use stream::Node;
pub use transcriber::Transcriber;

/// Names derived from a source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputNames {
    /// Name of the generated function.
    pub function: String,
    /// File name of the generated script, `<stem>.js`.
    pub script: String,
}

impl OutputNames {
    /// Derive names from a source path. The stem ends at the first `.`.
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();
        let stem = file_name.split('.').next().unwrap_or_default();
        Self {
            function: js::function_name(stem),
            script: format!("{stem}.js"),
        }
    }
}

/// Transcribe one markup source into a script.
pub fn transcribe_source(
    text: &str,
    names: &OutputNames,
    options: &FileOptions,
) -> Result<Code, TranscribeError> {
    let span = tracing::debug_span!("transcribe", function = %names.function);
    let _guard = span.enter();

    let source = SourceText::new(text)?;
    let tokens = MarkupLexer::new()
        .allow_anything_in_close_tags(options.allow_anything_in_close_tags)
        .tokenize(&source)?;
    tracing::trace!(tokens = tokens.len(), "markup lexed");

    let tokens = stream::strip_doctype(coalesce::coalesce(tokens))?;
    let nodes = stream::build_nodes(tokens, &mut TagLexer::new())?;
    let code = Transcriber::new(names, options).transcribe(&nodes)?;
    tracing::debug!(lines = code.len(), "transcribed");
    Ok(code)
}
