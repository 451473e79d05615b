use crate::options::RuleSeverity;

/// A rule violation, independent of where it happened.
pub trait Violation {
    fn name(&self) -> &'static str;
    fn body(&self) -> String;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning = 1,
    Error = 2,
}

impl Severity {
    /// The severity a rule reports with, or `None` when the rule is off.
    pub fn from_rule(severity: RuleSeverity) -> Option<Self> {
        match severity {
            RuleSeverity::Off => None,
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl serde::Serialize for Severity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// One message of a file report. Lines and columns start at 1.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Finding {
    pub fn new<T: Violation>(violation: T, severity: Severity, line: usize, column: usize) -> Self {
        Self {
            rule_id: violation.name().to_string(),
            severity,
            line,
            column,
            message: violation.body(),
        }
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.line, self.column, &self.rule_id, self.severity, &self.message).cmp(&(
            other.line,
            other.column,
            &other.rule_id,
            other.severity,
            &other.message,
        ))
    }
}
