//! Ordered gitignore-style pattern matching.
//!
//! A [`Matcher`] is a list of rules evaluated from last to first: the first
//! rule (from the end) that matches a path decides, and its polarity (plain or
//! `!`-negated) is the verdict. A set union of globs cannot express negation,
//! so every pattern is compiled on its own and keeps its position.
//!
//! Each rule is relative to a base directory. Patterns from the project
//! configuration use the project root; patterns read from a `.gitignore` use
//! the directory holding that file, so they never apply outside of it.

use std::path::{Path, PathBuf};

use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::fs::to_slash;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

#[derive(Debug, Clone)]
struct Rule<T> {
    pattern: String,
    base: PathBuf,
    glob: Gitignore,
    negated: bool,
    /// Literal directory prefix of an anchored pattern, `None` for patterns
    /// that can match at any depth.
    literal_prefix: Option<String>,
    source: T,
}

/// The rule that decided a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedRule<'a, T> {
    pub index: usize,
    pub pattern: &'a str,
    pub negated: bool,
    pub source: &'a T,
}

#[derive(Debug, Clone)]
pub struct Matcher<T = ()> {
    root: PathBuf,
    rules: Vec<Rule<T>>,
}

impl Matcher<()> {
    /// Compile `patterns`, all relative to `root`.
    pub fn compile<I, S>(root: &Path, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Matcher::new(root);
        for pattern in patterns {
            matcher.add(root, pattern.as_ref(), ());
        }
        matcher
    }
}

impl<T> Matcher<T> {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf(), rules: Vec::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a pattern relative to the absolute directory `base`.
    ///
    /// Blank lines and comments are skipped. A pattern that is not a valid
    /// glob is kept as a literal path instead of being rejected.
    pub fn add(&mut self, base: &Path, pattern: &str, source: T) {
        let glob = match compile_one(base, pattern) {
            Ok(glob) => glob,
            Err(err) => {
                tracing::debug!("Treating pattern `{pattern}` as a literal: {err}");
                match compile_one(base, &escape_pattern(pattern)) {
                    Ok(glob) => glob,
                    Err(err) => {
                        tracing::warn!("Skipping unusable pattern `{pattern}`: {err}");
                        return;
                    }
                }
            }
        };

        if glob.is_empty() {
            return;
        }

        self.rules.push(Rule {
            pattern: pattern.to_string(),
            base: base.to_path_buf(),
            negated: glob.num_whitelists() > 0,
            glob,
            literal_prefix: literal_prefix(pattern),
            source,
        });
    }

    /// The last rule matching `path` (relative to the matcher root), if any.
    pub fn decide(&self, path: &Path, is_dir: bool) -> Option<MatchedRule<'_, T>> {
        let absolute = self.root.join(path);
        self.rules
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, rule)| {
                let relative = absolute.strip_prefix(&rule.base).ok()?;
                if relative.as_os_str().is_empty() {
                    return None;
                }
                let relative = PathBuf::from(to_slash(relative));
                match rule.glob.matched_path_or_any_parents(&relative, is_dir) {
                    Match::None => None,
                    Match::Ignore(_) | Match::Whitelist(_) => {
                        tracing::trace!(
                            "`{}` matched pattern `{}` (rule {index})",
                            relative.display(),
                            rule.pattern
                        );
                        Some(MatchedRule {
                            index,
                            pattern: rule.pattern.as_str(),
                            negated: rule.negated,
                            source: &rule.source,
                        })
                    }
                }
            })
    }

    /// Whether `path` is matched, i.e. its deciding rule is not negated.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        self.decide(path, is_dir).is_some_and(|rule| !rule.negated)
    }

    /// Whether a negated rule placed after rule `after` could re-include
    /// something below the directory `dir`.
    ///
    /// Used to decide if an excluded directory can be skipped entirely during
    /// a walk. The answer errs on the side of `true`.
    pub fn could_reinclude(&self, dir: &Path, after: usize) -> bool {
        let absolute = self.root.join(dir);
        self.rules
            .iter()
            .skip(after + 1)
            .filter(|rule| rule.negated)
            .any(|rule| {
                if rule.base.starts_with(&absolute) {
                    return true;
                }
                let Ok(relative) = absolute.strip_prefix(&rule.base) else {
                    return false;
                };
                match &rule.literal_prefix {
                    None => true,
                    Some(prefix) => {
                        let dir = format!("{}/", to_slash(relative));
                        prefix.starts_with(&dir) || dir.starts_with(prefix.as_str())
                    }
                }
            })
    }
}

fn compile_one(base: &Path, pattern: &str) -> Result<Gitignore, ignore::Error> {
    let mut builder = GitignoreBuilder::new(base);
    builder.add_line(None, pattern)?;
    builder.build()
}

/// Escape glob metacharacters while keeping the gitignore markers (`!`, the
/// anchoring `/` and the directory-only trailing `/`) meaningful.
fn escape_pattern(pattern: &str) -> String {
    let (bang, body) = match pattern.strip_prefix('!') {
        Some(body) => ("!", body),
        None => ("", pattern),
    };
    let mut escaped = String::from(bang);
    for c in body.chars() {
        if GLOB_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn literal_prefix(pattern: &str) -> Option<String> {
    let body = pattern.trim();
    let body = body.strip_prefix('!').unwrap_or(body);
    let body = body.strip_prefix('/').unwrap_or(body);
    let body = body.strip_suffix('/').unwrap_or(body);

    if !body.contains('/') {
        return None;
    }

    let literal = match body.find(GLOB_META) {
        Some(end) => &body[..end],
        None => body,
    };
    let prefix = match literal.rfind('/') {
        Some(end) => &literal[..=end],
        None => "",
    };
    Some(prefix.to_string())
}
