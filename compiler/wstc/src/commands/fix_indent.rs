//! `wst fix-indent`: convert space indentation to tabs in place.

use std::fs;
use std::path::{Path, PathBuf};

use crate::discover;
use crate::error::DriverError;
use crate::fix_indent::retab;

/// Outcome for one file.
#[derive(Debug, PartialEq, Eq)]
enum FixResult {
    Fixed,
    LooksGood,
}

/// Run the fix-indent command over `args` (paths, default `.`).
pub fn run_fix_indent(args: &[String]) -> bool {
    let mut paths: Vec<&str> = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-v" | "--verbose" => {}
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {arg}");
                eprintln!("Usage: wst fix-indent [paths...]");
                return false;
            }
            arg => paths.push(arg),
        }
    }
    if paths.is_empty() {
        paths.push(".");
    }

    let mut ok = true;
    for path in paths {
        let files = match expand(Path::new(path)) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("error: {e}");
                ok = false;
                continue;
            }
        };
        for file in files {
            let name = file.file_name().unwrap_or(file.as_os_str()).to_string_lossy();
            match fix_file(&file) {
                Ok(FixResult::Fixed) => println!("Fixing {name}... fixed"),
                Ok(FixResult::LooksGood) => println!("Fixing {name}... looks good!"),
                Err(e) => {
                    println!("Fixing {name}... failed");
                    eprintln!("error: {e}");
                    ok = false;
                }
            }
        }
    }
    ok
}

fn expand(path: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        discover::markup_files(path)
    }
}

fn fix_file(path: &Path) -> Result<FixResult, DriverError> {
    let text = fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(fixed) = retab(&text) else {
        return Ok(FixResult::LooksGood);
    };
    fs::write(path, fixed).map_err(|source| DriverError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "indentation rewritten");
    Ok(FixResult::Fixed)
}

#[cfg(test)]
mod tests;
