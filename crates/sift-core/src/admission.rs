//! Decide which files are linted, and with which options.
//!
//! Files named on the command line and files found by walking a directory
//! follow different rules. A discovered file that is ignored is silently
//! skipped. An explicit file that is ignored aborts the whole run before
//! anything is linted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::WalkBuilder;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::{CliOptions, EffectiveConfig};
use crate::discovery::discover_config;
use crate::error::{AdmissionError, OptionError};
use crate::fs::{absolutize, display_relative, has_extension, relative_to, to_slash};
use crate::ignore_set::{IgnoreLayers, IgnoreSet, IgnoreSource};
use crate::options::LintOptions;
use crate::overrides::Overrides;
use crate::pattern::Matcher;

const GLOB_CHARS: &[char] = &['*', '?', '[', '{'];

/// Everything the command line contributes to admission.
#[derive(Clone, Debug, Default)]
pub struct AdmissionRequest {
    /// Directory the run starts from. Must be absolute.
    pub cwd: PathBuf,
    pub cli: CliOptions,
    /// Presets applied after the ones the configuration extends.
    pub extends: Vec<String>,
    /// `--ignore` patterns, relative to `cwd`.
    pub ignores: Vec<String>,
    pub no_default_ignore: bool,
}

/// A file to consider, and how it was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Named on the command line.
    Explicit(PathBuf),
    /// Found by walking a directory or expanding a glob.
    Discovered(PathBuf),
}

impl Input {
    pub fn path(&self) -> &Path {
        match self {
            Input::Explicit(path) | Input::Discovered(path) => path,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Ignored { source: IgnoreSource, pattern: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdmissionDecision {
    Admit { path: PathBuf, config: EffectiveConfig },
    Reject { path: PathBuf, reason: RejectReason },
}

impl AdmissionDecision {
    pub fn path(&self) -> &Path {
        match self {
            AdmissionDecision::Admit { path, .. } | AdmissionDecision::Reject { path, .. } => path,
        }
    }
}

/// A project ready for admission: configuration loaded, ignore rules and
/// overrides compiled. Read-only once loaded.
#[derive(Debug)]
pub struct Workspace {
    cwd: PathBuf,
    root: PathBuf,
    config_path: Option<PathBuf>,
    base: LintOptions,
    overrides: Overrides,
    ignores: Arc<IgnoreSet>,
    cli: CliOptions,
    extensions: Vec<String>,
}

impl Workspace {
    /// Load the configuration of the project enclosing `request.cwd`.
    ///
    /// Fails on an invalid command-line option or configuration, before any
    /// file is looked at.
    pub fn load(request: AdmissionRequest) -> Result<Self, AdmissionError> {
        request.cli.validate()?;

        let discovered = discover_config(&request.cwd, &request.extends)?;
        let root = discovered.root;
        let config = discovered.config;

        let ignores = IgnoreSet::build(
            &root,
            IgnoreLayers {
                default_ignore: !request.no_default_ignore,
                config: config.ignores().to_vec(),
                cli: request.ignores,
                cli_base: Some(request.cwd.clone()),
                ..Default::default()
            },
        );
        let overrides = Overrides::compile(&root, config.overrides());
        let extensions = EffectiveConfig::resolve(&config.options, &request.cli)?.extensions;

        Ok(Self {
            cwd: request.cwd,
            root,
            config_path: discovered.config_path,
            base: config.options,
            overrides,
            ignores: Arc::new(ignores),
            cli: request.cli,
            extensions,
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The options `path` is linted with. Files outside the project root only
    /// get the base configuration.
    pub fn config_for(&self, path: &Path) -> Result<EffectiveConfig, OptionError> {
        let path = absolutize(path, &self.cwd);
        let options = match relative_to(&path, &self.root) {
            Some(relative) => self.overrides.resolve(&self.base, &relative),
            None => self.base.clone(),
        };
        EffectiveConfig::resolve(&options, &self.cli)
    }

    /// Why `path` is ignored, if it is. Files outside the project root are
    /// never ignored.
    pub fn ignored_by(&self, path: &Path, is_dir: bool) -> Option<RejectReason> {
        let relative = relative_to(path, &self.root)?;
        self.ignores.explain(&relative, is_dir).map(|rule| RejectReason::Ignored {
            source: rule.source.clone(),
            pattern: rule.pattern.to_string(),
        })
    }

    /// Admit the files designated by `inputs`, or every lintable file below
    /// the working directory when `inputs` is empty.
    ///
    /// Decisions follow input order, files found in a directory being sorted by
    /// name. A file reached twice is only decided once.
    pub fn admit(&self, inputs: &[String]) -> Result<Vec<AdmissionDecision>, AdmissionError> {
        let inputs = self.expand(inputs)?;

        // Every explicit file is checked before any configuration is computed.
        let mut admitted = Vec::with_capacity(inputs.len());
        let mut decisions = Vec::with_capacity(inputs.len());
        for input in inputs {
            let reason = self.ignored_by_file(input.path());
            match (input, reason) {
                (Input::Explicit(path), Some(RejectReason::Ignored { source, pattern })) => {
                    tracing::debug!("{} is ignored by `{pattern}` from {source}", path.display());
                    return Err(AdmissionError::ExplicitIgnored {
                        path: display_relative(&path, &self.cwd),
                        layer: source,
                        pattern,
                    });
                }
                (Input::Discovered(path), Some(reason)) => {
                    tracing::debug!("Skipping ignored {}", path.display());
                    decisions.push(Some(AdmissionDecision::Reject { path, reason }));
                }
                (input, None) => {
                    admitted.push((decisions.len(), input));
                    decisions.push(None);
                }
            }
        }

        let configs = admitted
            .into_par_iter()
            .map(|(slot, input)| {
                let config = self.config_for(input.path())?;
                Ok((slot, input.path().to_path_buf(), config))
            })
            .collect::<Result<Vec<_>, OptionError>>()?;

        for (slot, path, config) in configs {
            decisions[slot] = Some(AdmissionDecision::Admit { path, config });
        }
        Ok(decisions.into_iter().flatten().collect())
    }

    /// Options for source read from standard input and reported as `name`, or
    /// `None` when `name` is ignored.
    pub fn admit_stdin(&self, name: &Path) -> Result<Option<EffectiveConfig>, AdmissionError> {
        let path = absolutize(name, &self.cwd);
        if let Some(reason) = self.ignored_by_file(&path) {
            tracing::debug!("Standard input named {} is ignored: {reason:?}", path.display());
            return Ok(None);
        }
        Ok(Some(self.config_for(&path)?))
    }

    fn ignored_by_file(&self, path: &Path) -> Option<RejectReason> {
        self.ignored_by(path, false)
    }

    fn expand(&self, inputs: &[String]) -> Result<Vec<Input>, AdmissionError> {
        let mut seen = FxHashSet::default();
        let mut expanded = Vec::new();
        let mut push = |input: Input| {
            if seen.insert(input.path().to_path_buf()) {
                expanded.push(input);
            }
        };

        if inputs.is_empty() {
            for path in self.walk(&self.cwd) {
                push(Input::Discovered(path));
            }
        }

        for input in inputs {
            let path = absolutize(Path::new(input), &self.cwd);
            if path.is_dir() {
                for path in self.walk(&path) {
                    push(Input::Discovered(path));
                }
            } else if path.is_file() {
                push(Input::Explicit(path));
            } else if input.contains(GLOB_CHARS) {
                for path in self.expand_glob(input) {
                    push(Input::Discovered(path));
                }
            } else {
                return Err(AdmissionError::NotFound { path: display_relative(&path, &self.cwd) });
            }
        }

        Ok(expanded)
    }

    /// Files below `dir` with a lintable extension, skipping ignored
    /// directories that nothing can re-include. Extensions added by an
    /// override only count for the files that override applies to.
    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        let ignores = Arc::clone(&self.ignores);
        let mut builder = WalkBuilder::new(dir);
        builder
            .standard_filters(false)
            .hidden(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                match relative_to(entry.path(), ignores.root()) {
                    Some(relative) => !ignores.should_skip_dir(&relative),
                    None => true,
                }
            });

        let mut files = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
                    if is_file && self.has_lintable_extension(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => tracing::warn!("Skipping unreadable entry: {err}"),
            }
        }
        files
    }

    fn has_lintable_extension(&self, path: &Path) -> bool {
        if has_extension(path, &self.extensions) {
            return true;
        }
        if self.overrides.is_empty() {
            return false;
        }
        match self.config_for(path) {
            Ok(config) => has_extension(path, &config.extensions),
            // Admitted so that the option error is reported for this file.
            Err(_) => true,
        }
    }

    /// Files below the working directory matching the glob `pattern`, anchored
    /// at the working directory like a shell glob.
    fn expand_glob(&self, pattern: &str) -> Vec<PathBuf> {
        let anchored = to_slash(Path::new(pattern));
        let anchored = if anchored.starts_with("**") { anchored } else { format!("/{anchored}") };
        let mut matcher = Matcher::new(&self.cwd);
        matcher.add(&self.cwd, &anchored, ());

        let files: Vec<_> = self
            .walk(&self.cwd)
            .into_iter()
            .filter(|path| relative_to(path, &self.cwd).is_some_and(|relative| matcher.matches(&relative, false)))
            .collect();
        if files.is_empty() {
            tracing::warn!("No files matching the pattern `{pattern}` were found");
        } else {
            tracing::debug!("Glob `{pattern}` matched {} files", files.len());
        }
        files
    }
}
