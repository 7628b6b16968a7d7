//! Driver errors: filesystem failures and per-file transcription failures.

use std::io;
use std::path::PathBuf;

use wst_transcribe::{ConfigError, ErrorKind, TranscribeError};

/// Why a driver operation failed.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Transcribe {
        path: PathBuf,
        #[source]
        source: TranscribeError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Category of a failed file, as counted in a batch report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Io,
    Config,
    Transcribe(ErrorKind),
}

impl DriverError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            DriverError::Read { .. } | DriverError::Write { .. } => FailureKind::Io,
            DriverError::Transcribe { source, .. } => FailureKind::Transcribe(source.kind()),
            DriverError::Config(_) => FailureKind::Config,
        }
    }
}
