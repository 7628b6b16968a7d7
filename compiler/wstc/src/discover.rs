//! Markup file discovery.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DriverError;

/// Extension of the markup files a target holds.
pub const MARKUP_EXTENSION: &str = "html";

/// Find every markup file under `root`, breadth-first.
///
/// Files of one directory come before those of its subdirectories, and
/// entries within a directory are visited in name order. Hidden entries are
/// skipped. An unreadable `root` is an error; an unreadable subdirectory is
/// logged and skipped.
pub fn markup_files(root: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let mut files = Vec::new();
    let mut queue = VecDeque::new();

    let (root_files, root_dirs) = read_sorted(root).map_err(|source| DriverError::Read {
        path: root.to_path_buf(),
        source,
    })?;
    files.extend(root_files);
    queue.extend(root_dirs);

    while let Some(dir) = queue.pop_front() {
        match read_sorted(&dir) {
            Ok((dir_files, subdirs)) => {
                files.extend(dir_files);
                queue.extend(subdirs);
            }
            Err(e) => tracing::warn!(path = %dir.display(), "skipping unreadable directory: {e}"),
        }
    }
    Ok(files)
}

/// Markup files and subdirectories directly inside `dir`, each sorted.
fn read_sorted(dir: &Path) -> std::io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            dirs.push(path);
        } else if is_markup(&path) {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Whether `path` names a markup file.
pub fn is_markup(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKUP_EXTENSION))
}
