//! The layered set of ignore rules applied to a project.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::pattern::{MatchedRule, Matcher};

/// Directories and files excluded by default, on top of `.gitignore`.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules/",
    "bower_components/",
    "/flow-typed/",
    "/coverage/",
    "/tmp/",
    "/temp/",
    "/vendor/",
    "/dist/",
    "*.min.js",
    "/tap-snapshots/",
];

/// Never linted, even with `--no-default-ignore`.
pub const ALWAYS_IGNORED: &str = ".git/";

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Where an ignore rule comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoreSource {
    Default,
    Vcs(PathBuf),
    Config,
    Cli,
}

impl fmt::Display for IgnoreSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreSource::Default => f.write_str("default ignores"),
            IgnoreSource::Vcs(path) => write!(f, "{}", path.display()),
            IgnoreSource::Config => f.write_str("`ignores` in the configuration"),
            IgnoreSource::Cli => f.write_str("--ignore"),
        }
    }
}

/// The patterns of one `.gitignore` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VcsIgnoreFile {
    pub path: PathBuf,
    pub patterns: Vec<String>,
}

impl VcsIgnoreFile {
    fn read(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Some(Self {
                path: path.to_path_buf(),
                patterns: contents.lines().map(|line| line.trim_end_matches('\r').to_string()).collect(),
            }),
            Err(err) => {
                tracing::warn!("Skipping unreadable {}: {err}", path.display());
                None
            }
        }
    }

    fn base(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// Everything an [`IgnoreSet`] is made of, lowest precedence first.
#[derive(Clone, Debug, Default)]
pub struct IgnoreLayers {
    pub default_ignore: bool,
    pub vcs: Vec<VcsIgnoreFile>,
    /// Patterns relative to the project root.
    pub config: Vec<String>,
    /// Patterns relative to `cli_base`, usually the working directory.
    pub cli: Vec<String>,
    pub cli_base: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct IgnoreSet {
    matcher: Matcher<IgnoreSource>,
}

impl IgnoreSet {
    /// Build the ignore set of the project rooted at `root`, reading its
    /// `.gitignore` files.
    pub fn build(root: &Path, mut layers: IgnoreLayers) -> Self {
        layers.vcs = collect_gitignores(root, layers.default_ignore);
        Self::from_layers(root, &layers)
    }

    /// Concatenate the layers in their fixed order: defaults, `.gitignore`
    /// files, configuration, command line.
    pub fn from_layers(root: &Path, layers: &IgnoreLayers) -> Self {
        let mut matcher = Matcher::new(root);

        if layers.default_ignore {
            for pattern in DEFAULT_IGNORES {
                matcher.add(root, pattern, IgnoreSource::Default);
            }
        }
        matcher.add(root, ALWAYS_IGNORED, IgnoreSource::Default);

        for file in &layers.vcs {
            for pattern in &file.patterns {
                matcher.add(file.base(), pattern, IgnoreSource::Vcs(file.path.clone()));
            }
        }
        for pattern in &layers.config {
            matcher.add(root, &normalize_user_pattern(pattern), IgnoreSource::Config);
        }
        let cli_base = layers.cli_base.as_deref().unwrap_or(root);
        for pattern in &layers.cli {
            matcher.add(cli_base, &normalize_user_pattern(pattern), IgnoreSource::Cli);
        }

        tracing::debug!("Compiled {} ignore rules for {}", matcher.len(), root.display());
        Self { matcher }
    }

    pub fn root(&self) -> &Path {
        self.matcher.root()
    }

    /// Whether `path`, relative to the project root, is ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.matcher.matches(path, is_dir)
    }

    /// The rule that ignores `path`, or `None` if it is not ignored.
    pub fn explain(&self, path: &Path, is_dir: bool) -> Option<MatchedRule<'_, IgnoreSource>> {
        self.matcher.decide(path, is_dir).filter(|rule| !rule.negated)
    }

    /// Whether the walk can skip the directory `path` and all of its content.
    pub fn should_skip_dir(&self, path: &Path) -> bool {
        match self.explain(path, true) {
            Some(rule) => !self.matcher.could_reinclude(path, rule.index),
            None => false,
        }
    }
}

/// Rewrite a path-like pattern such as `./baz.js` as the anchored `/baz.js`.
/// A leading `!` is kept.
pub fn normalize_user_pattern(pattern: &str) -> String {
    let (negation, body) = match pattern.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", pattern),
    };
    let mut rest = body;
    let mut anchored = false;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
        anchored = true;
    }
    if !anchored {
        return pattern.to_string();
    }
    format!("{negation}/{rest}")
}

/// The `.gitignore` files applying to the project rooted at `root`.
///
/// That is the nearest one found walking up from `root` (included), without
/// leaving the enclosing repository, followed by every `.gitignore` nested
/// below `root`.
pub fn collect_gitignores(root: &Path, default_ignore: bool) -> Vec<VcsIgnoreFile> {
    let mut files = Vec::new();

    for dir in root.ancestors() {
        let candidate = dir.join(GITIGNORE_FILE);
        if candidate.is_file() {
            files.extend(VcsIgnoreFile::read(&candidate));
            break;
        }
        if dir.join(".git").exists() {
            break;
        }
    }

    let defaults = IgnoreSet::from_layers(root, &IgnoreLayers { default_ignore, ..Default::default() });
    let prune_root = root.to_path_buf();
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            match entry.path().strip_prefix(&prune_root) {
                Ok(relative) if !relative.as_os_str().is_empty() => !defaults.should_skip_dir(relative),
                _ => true,
            }
        });

    for result in builder.build() {
        match result {
            Ok(entry) => {
                let nested = entry.depth() >= 2
                    && entry.file_name() == GITIGNORE_FILE
                    && entry.file_type().is_some_and(|ft| ft.is_file());
                if nested {
                    tracing::debug!("Found nested {}", entry.path().display());
                    files.extend(VcsIgnoreFile::read(entry.path()));
                }
            }
            Err(err) => tracing::warn!("Skipping unreadable entry: {err}"),
        }
    }

    files
}
