//! Per-glob option overrides.

use std::path::Path;

use crate::options::LintOptions;
use crate::pattern::Matcher;
use crate::settings::Override;

#[derive(Debug, Clone)]
struct CompiledOverride {
    files: Matcher,
    options: LintOptions,
    nested: Overrides,
}

/// The `overrides` of a configuration, compiled once and shared by every file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: Vec<CompiledOverride>,
}

impl Overrides {
    /// Compile the override blocks. Their `files` globs are relative to `root`.
    pub fn compile(root: &Path, overrides: &[Override]) -> Self {
        let entries = overrides
            .iter()
            .map(|entry| CompiledOverride {
                files: Matcher::compile(root, entry.files.to_vec()),
                options: entry.options.clone(),
                nested: Overrides::compile(root, &entry.overrides),
            })
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge onto `base` every override matching `path`, in declaration order.
    ///
    /// `path` is relative to the project root. Every matching override is
    /// applied, so later blocks only win on the keys they set. A nested block
    /// is considered only when its parent matched.
    pub fn resolve(&self, base: &LintOptions, path: &Path) -> LintOptions {
        self.apply(base.clone(), path)
    }

    fn apply(&self, mut options: LintOptions, path: &Path) -> LintOptions {
        for entry in &self.entries {
            if !entry.files.matches(path, false) {
                continue;
            }
            tracing::trace!("Applying override to `{}`", path.display());
            options = options.merge(entry.options.clone());
            options = entry.nested.apply(options, path);
        }
        options
    }
}
