//! Target configuration.
//!
//! A [`TargetConfig`] describes one directory of markup files and how each
//! of them is turned into a script. It is validated once with
//! [`TargetConfig::validate`]; the transcriber itself only ever sees the
//! per-file [`FileOptions`] resolved from it.

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use crate::error::ConfigError;
use crate::js::is_identifier;

/// Which files of the target directory are transcribed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FileSelection {
    /// Every `*.html` file found under the directory.
    #[default]
    All,
    /// These files, relative to the directory, in this order.
    Listed(Vec<PathBuf>),
}

/// What the generated function does with the element it builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Return the base element to the caller.
    #[default]
    Return,
    /// Replace an existing element of the page.
    Replace,
}

/// Id of the element replaced by each file's function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReplacementIds {
    /// Replace the `<script>` element that loaded the output file.
    #[default]
    None,
    /// One id for every file.
    Shared(String),
    /// One id per listed file.
    PerFile(Vec<String>),
}

/// Parameter names of each file's function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Parameters {
    #[default]
    None,
    /// The same names for every file.
    Shared(Vec<String>),
    /// One list per listed file.
    PerFile(Vec<Vec<String>>),
}

/// Configuration of one target directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetConfig {
    pub path: PathBuf,
    pub files: FileSelection,
    pub behavior: Behavior,
    pub replacement: ReplacementIds,
    pub parameters: Parameters,
    /// Call the function once the DOM is ready.
    pub onload: bool,
    pub minify: bool,
    /// Keep going on a mismatched closing tag instead of failing.
    pub lenient_closing_tags: bool,
    pub allow_anything_in_close_tags: bool,
    /// Route text holding character references through `dec`.
    pub decode_entities: bool,
}

impl TargetConfig {
    /// A configuration for `path` with default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let defaults = FileOptions::default();
        Self {
            path: path.into(),
            files: FileSelection::All,
            behavior: defaults.behavior,
            replacement: ReplacementIds::None,
            parameters: Parameters::None,
            onload: defaults.onload,
            minify: defaults.minify,
            lenient_closing_tags: defaults.lenient_closing_tags,
            allow_anything_in_close_tags: defaults.allow_anything_in_close_tags,
            decode_entities: defaults.decode_entities,
        }
    }

    /// Check the combination of settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.behavior == Behavior::Return {
            if self.onload {
                return Err(ConfigError::ReturnWithOnload);
            }
            if self.replacement != ReplacementIds::None {
                return Err(ConfigError::ReturnWithReplacementId);
            }
        }

        match &self.replacement {
            ReplacementIds::None => {}
            ReplacementIds::Shared(id) => check_id(id)?,
            ReplacementIds::PerFile(ids) => {
                self.check_per_file_len("ids", ids.len())?;
                ids.iter().try_for_each(|id| check_id(id))?;
            }
        }

        match &self.parameters {
            Parameters::None => {}
            Parameters::Shared(names) => check_parameters(names)?,
            Parameters::PerFile(sets) => {
                self.check_per_file_len("parameter lists", sets.len())?;
                sets.iter().try_for_each(|names| check_parameters(names))?;
            }
        }
        Ok(())
    }

    /// Resolve the options of the file at `index` of the selection.
    ///
    /// With [`FileSelection::All`] only shared settings exist, so any index
    /// resolves to them.
    pub fn file_options(&self, index: usize) -> FileOptions {
        let replacement_id = match &self.replacement {
            ReplacementIds::None => None,
            ReplacementIds::Shared(id) => Some(id.clone()),
            ReplacementIds::PerFile(ids) => ids.get(index).cloned(),
        };
        let parameters = match &self.parameters {
            Parameters::None => Vec::new(),
            Parameters::Shared(names) => names.clone(),
            Parameters::PerFile(sets) => sets.get(index).cloned().unwrap_or_default(),
        };
        FileOptions {
            behavior: self.behavior,
            replacement_id,
            parameters,
            onload: self.onload,
            minify: self.minify,
            lenient_closing_tags: self.lenient_closing_tags,
            allow_anything_in_close_tags: self.allow_anything_in_close_tags,
            decode_entities: self.decode_entities,
        }
    }

    fn check_per_file_len(&self, what: &'static str, found: usize) -> Result<(), ConfigError> {
        match &self.files {
            FileSelection::All => Err(ConfigError::PerFileWithoutList { what }),
            FileSelection::Listed(files) if files.len() != found => Err(ConfigError::PerFileLength {
                what,
                expected: files.len(),
                found,
            }),
            FileSelection::Listed(_) => Ok(()),
        }
    }
}

/// Everything the transcriber needs to know about one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileOptions {
    pub behavior: Behavior,
    pub replacement_id: Option<String>,
    pub parameters: Vec<String>,
    pub onload: bool,
    pub minify: bool,
    pub lenient_closing_tags: bool,
    pub allow_anything_in_close_tags: bool,
    pub decode_entities: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            behavior: Behavior::Return,
            replacement_id: None,
            parameters: Vec::new(),
            onload: false,
            minify: true,
            lenient_closing_tags: false,
            allow_anything_in_close_tags: false,
            decode_entities: true,
        }
    }
}

/// Element ids start with a letter and hold only word characters, `.`,
/// `:`, `_` and `-`.
pub fn is_valid_id(id: &str) -> bool {
    id.starts_with(|c: char| c.is_alphabetic())
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '-'))
}

fn check_id(id: &str) -> Result<(), ConfigError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(ConfigError::InvalidId(id.to_owned()))
    }
}

/// Names the generated code binds itself: element identifiers, the decode
/// helper and the replaced/loader element handles.
fn is_reserved_parameter(name: &str) -> bool {
    let element_ident = name
        .strip_prefix('e')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
    element_ident || matches!(name, "dec" | "replaced" | "loader" | "event")
}

fn check_parameters(names: &[String]) -> Result<(), ConfigError> {
    let mut seen = FxHashSet::default();
    for name in names {
        if !is_identifier(name) {
            return Err(ConfigError::InvalidParameter(name.clone()));
        }
        if is_reserved_parameter(name) {
            return Err(ConfigError::ReservedParameter(name.clone()));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::DuplicateParameter(name.clone()));
        }
    }
    Ok(())
}
