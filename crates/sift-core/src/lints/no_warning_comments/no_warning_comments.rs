use std::sync::LazyLock;

use regex::Regex;

use crate::config::EffectiveConfig;
use crate::diagnostic::*;
use crate::utils::ScannedSource;

static WARNING_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(todo|fixme|xxx)\b").unwrap());

pub struct WarningComment {
    term: String,
}

/// ## What it does
///
/// Reports comments starting with `TODO`, `FIXME` or `XXX`.
///
/// ## Why is this bad?
///
/// These comments mark unfinished work. Reporting them keeps them from being
/// forgotten.
impl Violation for WarningComment {
    fn name(&self) -> &'static str {
        "no-warning-comments"
    }
    fn body(&self) -> String {
        format!("Unexpected '{}' comment.", self.term)
    }
}

pub fn no_warning_comments(
    source: &ScannedSource<'_>,
    _config: &EffectiveConfig,
    severity: Severity,
) -> Vec<Finding> {
    source
        .comments
        .iter()
        .filter_map(|comment| {
            let captures = WARNING_TERM.captures(&comment.text)?;
            let term = captures.get(1)?.as_str().to_lowercase();
            Some(Finding::new(WarningComment { term }, severity, comment.line, comment.column))
        })
        .collect()
}
