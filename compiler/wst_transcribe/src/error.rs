//! Transcription and configuration errors.

use wst_lexer::LexError;

/// The markup is well-formed lexically but does not describe a single
/// buildable element tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("source must start with <!DOCTYPE html>, found {found:?}")]
    MissingDoctype { found: String },

    #[error("found two base elements: initial <{first}>, second <{second}>")]
    DuplicateBaseElement { first: String, second: String },

    #[error("self-closing <{tag}> cannot be the base element")]
    VoidBaseElement { tag: String },

    #[error("no base element found")]
    MissingBaseElement,

    #[error("tag without a name, line {line}")]
    MissingTagName { line: u32 },

    #[error("closing tag </{tag}> with no open element, line {line}")]
    StackUnderflow { tag: String, line: u32 },

    #[error("text outside of any element, line {line}")]
    TextOutsideElement { line: u32 },
}

/// Any failure while transcribing one file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranscribeError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("found closing tag </{found}> but current element is <{expected}>, line {line}")]
    TagMismatch {
        expected: String,
        found: String,
        line: u32,
    },
}

/// Discriminant of [`TranscribeError`] for batch reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Structural,
    TagMismatch,
}

impl TranscribeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscribeError::Lex(_) => ErrorKind::Lex,
            TranscribeError::Structural(_) => ErrorKind::Structural,
            TranscribeError::TagMismatch { .. } => ErrorKind::TagMismatch,
        }
    }
}

/// An invalid [`TargetConfig`](crate::TargetConfig).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("behavior 'return' cannot be combined with onload")]
    ReturnWithOnload,

    #[error("behavior 'return' cannot be combined with a replacement id")]
    ReturnWithReplacementId,

    #[error("per-file {what} need an explicit file list")]
    PerFileWithoutList { what: &'static str },

    #[error("{found} per-file {what} given for {expected} files")]
    PerFileLength {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid element id {0:?}: must start with a letter and contain only word characters, '.', ':', '_' or '-'")]
    InvalidId(String),

    #[error("invalid parameter name {0:?}: not a JavaScript identifier")]
    InvalidParameter(String),

    #[error("parameter name {0:?} is reserved by the generated code")]
    ReservedParameter(String),

    #[error("parameter {0:?} is listed twice")]
    DuplicateParameter(String),
}
