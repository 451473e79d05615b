use crate::diagnostic::{Finding, Severity};

/// The result of linting one file, as handed to reporters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_path: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub messages: Vec<Finding>,
}

impl FileReport {
    /// With `quiet`, warnings are dropped and only errors are reported.
    pub fn new(file_path: String, mut findings: Vec<Finding>, quiet: bool) -> Self {
        if quiet {
            findings.retain(|finding| finding.severity == Severity::Error);
        }
        let error_count = findings.iter().filter(|f| f.severity == Severity::Error).count();
        let warning_count = findings.len() - error_count;
        Self { file_path, error_count, warning_count, messages: findings }
    }

    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }
}
