//! Driver for the WST transcriber: batch runs, file discovery, per-target
//! locking, indentation fixing and the `wst` command handlers.
//!
//! The `wst` binary is a thin dispatcher over [`commands`]; everything it
//! does is reachable from this library so it can be tested without
//! spawning processes.

pub mod batch;
pub mod commands;
pub mod discover;
pub mod error;
pub mod fix_indent;
pub mod locks;
pub mod logging;

pub use batch::{transcribe_target, BatchReport};
pub use error::{DriverError, FailureKind};
pub use locks::TargetLocks;
