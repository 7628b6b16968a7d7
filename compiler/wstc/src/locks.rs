//! Per-target serialization of re-transcriptions.
//!
//! A front-end that reacts to file changes may ask for the same target to be
//! transcribed again while a previous run is still writing. [`TargetLocks`]
//! hands out one mutex per target so such runs queue up, while runs for
//! different targets stay concurrent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// One lock per target directory.
#[derive(Debug, Default)]
pub struct TargetLocks {
    locks: Mutex<FxHashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl TargetLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock of `target`.
    ///
    /// The target is keyed by its canonical path when it exists, so `a/../a`
    /// and `a` share a lock.
    pub fn run_exclusive<T>(&self, target: &Path, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(target);
        let _held = lock.lock();
        f()
    }

    /// Number of targets seen so far.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_for(&self, target: &Path) -> Arc<Mutex<()>> {
        let key = target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf());
        // The map lock is released before the target lock is taken.
        Arc::clone(self.locks.lock().entry(key).or_default())
    }
}
