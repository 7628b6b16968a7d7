//! Batch transcription of a target directory.
//!
//! Files run in parallel on a scoped rayon pool. Each file is read,
//! transcribed and rendered in memory; its `<stem>.js` is written next to
//! the source only when all of that succeeded, through a temporary file
//! renamed into place. A failing file is logged and counted, and the rest
//! of the batch carries on.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;
use wst_emit::Code;
use wst_transcribe::{transcribe_source, FileOptions, FileSelection, OutputNames, TargetConfig};

use crate::discover;
use crate::error::{DriverError, FailureKind};

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Scripts written, in file order.
    pub written: Vec<PathBuf>,
    /// Failed sources with their errors, in file order.
    pub failed: Vec<(PathBuf, DriverError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Failure counts per category.
    pub fn failure_counts(&self) -> FxHashMap<FailureKind, usize> {
        let mut counts = FxHashMap::default();
        for (_, error) in &self.failed {
            *counts.entry(error.failure_kind()).or_insert(0) += 1;
        }
        counts
    }

    fn record(&mut self, source: PathBuf, outcome: Result<PathBuf, DriverError>) {
        match outcome {
            Ok(script) => self.written.push(script),
            Err(error) => self.failed.push((source, error)),
        }
    }
}

/// Read and transcribe one file without writing anything.
pub fn transcribe_file(path: &Path, options: &FileOptions) -> Result<Code, DriverError> {
    let text = fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let names = OutputNames::from_path(path);
    transcribe_source(&text, &names, options).map_err(|source| DriverError::Transcribe {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of the script generated for `source`.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_file_name(OutputNames::from_path(source).script)
}

/// Transcribe `source` and write its script. Returns the script path.
pub fn transcribe_and_write(source: &Path, options: &FileOptions) -> Result<PathBuf, DriverError> {
    let span = tracing::info_span!("file", path = %source.display());
    let _guard = span.enter();

    let rendered = transcribe_file(source, options)?.render();
    let target = output_path(source);
    write_atomically(&target, &rendered)?;
    Ok(target)
}

/// Write `contents` to a temporary file next to `target`, then rename it
/// over `target`. A failed write leaves `target` as it was.
pub fn write_atomically(target: &Path, contents: &str) -> Result<(), DriverError> {
    let write_error = |source| DriverError::Write {
        path: target.to_path_buf(),
        source,
    };
    let dir = target
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.persist(target).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Source paths of a target, in the order their options are resolved.
pub fn selected_files(config: &TargetConfig) -> Result<Vec<PathBuf>, DriverError> {
    match &config.files {
        FileSelection::All => discover::markup_files(&config.path),
        FileSelection::Listed(files) => Ok(files.iter().map(|f| config.path.join(f)).collect()),
    }
}

/// Validate `config` and transcribe every selected file.
///
/// Configuration and discovery problems abort the batch; per-file problems
/// end up in the report.
pub fn transcribe_target(config: &TargetConfig) -> Result<BatchReport, DriverError> {
    config.validate()?;
    let files = selected_files(config)?;
    tracing::debug!(dir = %config.path.display(), files = files.len(), "starting batch");

    let run = |(index, source): (usize, &PathBuf)| {
        let outcome = transcribe_and_write(source, &config.file_options(index));
        match &outcome {
            Ok(script) => tracing::info!("wrote {}", script.display()),
            Err(e) => tracing::error!("{e}"),
        }
        (source.clone(), outcome)
    };

    let outcomes: Vec<_> = rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| files.par_iter().enumerate().map(run).collect())
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            files.iter().enumerate().map(run).collect()
        });

    let mut report = BatchReport::default();
    for (source, outcome) in outcomes {
        report.record(source, outcome);
    }
    Ok(report)
}
