//! `wst transcribe`: turn markup files into DOM-building scripts.

use std::io;
use std::path::{Path, PathBuf};

use wst_transcribe::{Behavior, FileSelection, Parameters, ReplacementIds, TargetConfig};

use crate::batch::{transcribe_file, transcribe_target, BatchReport};
use crate::error::DriverError;
use crate::locks::TargetLocks;

/// Parsed arguments of the transcribe command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscribeArgs {
    /// Files or directories, each transcribed as its own target.
    pub paths: Vec<PathBuf>,
    /// Settings shared by every target; `path` and `files` are filled in
    /// per target.
    pub template: TargetConfig,
    /// Print a single file's script instead of writing it.
    pub stdout: bool,
}

/// Parse `args` (everything after `transcribe`).
pub fn parse_transcribe_args(args: &[String]) -> Result<TranscribeArgs, String> {
    let mut config = TargetConfig::new(".");
    let mut paths = Vec::new();
    let mut stdout = false;

    for arg in args {
        if let Some(behavior) = arg.strip_prefix("--behavior=") {
            config.behavior = match behavior {
                "return" => Behavior::Return,
                "replace" => Behavior::Replace,
                other => return Err(format!("unknown behavior '{other}' (expected return or replace)")),
            };
        } else if let Some(id) = arg.strip_prefix("--id=") {
            set_replacement(&mut config, ReplacementIds::Shared(id.to_owned()))?;
        } else if let Some(ids) = arg.strip_prefix("--ids=") {
            set_replacement(&mut config, ReplacementIds::PerFile(split_list(ids)))?;
        } else if let Some(params) = arg.strip_prefix("--params=") {
            set_parameters(&mut config, Parameters::Shared(split_list(params)))?;
        } else if let Some(sets) = arg.strip_prefix("--file-params=") {
            let sets = sets.split(';').map(split_list).collect();
            set_parameters(&mut config, Parameters::PerFile(sets))?;
        } else if let Some(files) = arg.strip_prefix("--files=") {
            let files = split_list(files).into_iter().map(PathBuf::from).collect();
            config.files = FileSelection::Listed(files);
        } else {
            match arg.as_str() {
                "--onload" => config.onload = true,
                "--no-minify" => config.minify = false,
                "--lenient" => config.lenient_closing_tags = true,
                "--allow-any-close" => config.allow_anything_in_close_tags = true,
                "--no-decode" => config.decode_entities = false,
                "--stdout" => stdout = true,
                "-v" | "--verbose" => {}
                flag if flag.starts_with('-') => return Err(format!("unknown option: {flag}")),
                path => paths.push(PathBuf::from(path)),
            }
        }
    }

    if paths.is_empty() {
        return Err("missing file or directory".to_owned());
    }
    if stdout && (paths.len() != 1 || !paths[0].is_file()) {
        return Err("--stdout takes exactly one file".to_owned());
    }
    Ok(TranscribeArgs {
        paths,
        template: config,
        stdout,
    })
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn set_replacement(config: &mut TargetConfig, ids: ReplacementIds) -> Result<(), String> {
    if config.replacement != ReplacementIds::None {
        return Err("--id and --ids are mutually exclusive".to_owned());
    }
    config.replacement = ids;
    Ok(())
}

fn set_parameters(config: &mut TargetConfig, params: Parameters) -> Result<(), String> {
    if config.parameters != Parameters::None {
        return Err("--params and --file-params are mutually exclusive".to_owned());
    }
    config.parameters = params;
    Ok(())
}

/// Configuration for one command-line path.
///
/// A file becomes a target of its parent directory listing only that file,
/// unless `--files` already lists the files.
pub(crate) fn target_for(path: &Path, template: &TargetConfig) -> TargetConfig {
    let mut config = template.clone();
    match (path.is_file(), path.parent(), path.file_name()) {
        (true, Some(parent), Some(name)) if config.files == FileSelection::All => {
            config.path = parent.to_path_buf();
            config.files = FileSelection::Listed(vec![PathBuf::from(name)]);
        }
        _ => config.path = path.to_path_buf(),
    }
    config
}

/// Run the transcribe command.
pub fn run_transcribe(args: &[String]) -> bool {
    let args = match parse_transcribe_args(args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run 'wst help' for usage");
            return false;
        }
    };

    if args.stdout {
        return print_file(&args.paths[0], &args.template);
    }

    let locks = TargetLocks::new();
    let reports: Vec<Result<BatchReport, DriverError>> = std::thread::scope(|s| {
        let handles: Vec<_> = args
            .paths
            .iter()
            .map(|path| {
                let config = target_for(path, &args.template);
                let locks = &locks;
                s.spawn(move || locks.run_exclusive(&config.path, || transcribe_target(&config)))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut written = 0;
    let mut failed = 0;
    let mut ok = true;
    for report in reports {
        match report {
            Ok(report) => {
                written += report.written.len();
                failed += report.failed.len();
                ok &= report.is_success();
            }
            Err(e) => {
                eprintln!("error: {e}");
                ok = false;
            }
        }
    }

    println!();
    if failed == 0 {
        println!("{written} file(s) transcribed");
    } else {
        println!("{written} file(s) transcribed, {failed} failed");
    }
    ok
}

fn print_file(path: &Path, template: &TargetConfig) -> bool {
    let config = target_for(path, template);
    if let Err(e) = config.validate() {
        eprintln!("error: invalid configuration: {e}");
        return false;
    }
    let result = transcribe_file(path, &config.file_options(0))
        .and_then(|code| {
            code.write_to(io::stdout().lock()).map_err(|source| DriverError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
        });
    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("error: {e}");
            false
        }
    }
}
