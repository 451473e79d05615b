use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::admission::AdmissionDecision;
use crate::config::EffectiveConfig;
use crate::diagnostic::Finding;
use crate::lints::LintEngine;

/// Lint every admitted file in parallel. Results keep the order of
/// `decisions`; rejected files are left out.
pub fn check<E: LintEngine>(
    engine: &E,
    decisions: &[AdmissionDecision],
) -> Vec<(PathBuf, Result<Vec<Finding>, anyhow::Error>)> {
    decisions
        .par_iter()
        .filter_map(|decision| match decision {
            AdmissionDecision::Admit { path, config } => Some((path.clone(), lint_path(engine, path, config))),
            AdmissionDecision::Reject { .. } => None,
        })
        .collect()
}

pub fn lint_path<E: LintEngine>(engine: &E, path: &Path, config: &EffectiveConfig) -> Result<Vec<Finding>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    tracing::trace!("Linting {}", path.display());
    Ok(engine.lint(&contents, config))
}
