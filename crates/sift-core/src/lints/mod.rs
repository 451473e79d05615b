use crate::config::EffectiveConfig;
use crate::diagnostic::{Finding, Severity};
use crate::options::RuleSeverity;
use crate::utils::{ScannedSource, scan};

pub(crate) mod indent;
pub(crate) mod no_warning_comments;
pub(crate) mod semi;

type RuleCheck = fn(&ScannedSource<'_>, &EffectiveConfig, Severity) -> Vec<Finding>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub default_severity: RuleSeverity,
    /// Formatting rules are turned off when `prettier` is enabled, unless the
    /// configuration sets them explicitly.
    pub formatting: bool,
    check: RuleCheck,
}

impl Rule {
    /// The severity this rule reports with under `config`, `None` if it is off.
    pub fn severity(&self, config: &EffectiveConfig) -> Option<Severity> {
        let severity = match config.rule_severity(self.name) {
            Some(severity) => severity,
            None if self.formatting && config.prettier => RuleSeverity::Off,
            None => self.default_severity,
        };
        Severity::from_rule(severity)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("default_severity", &self.default_severity)
            .field("formatting", &self.formatting)
            .finish()
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "indent",
        default_severity: RuleSeverity::Error,
        formatting: true,
        check: indent::indent::indent,
    },
    Rule {
        name: "no-warning-comments",
        default_severity: RuleSeverity::Warn,
        formatting: false,
        check: no_warning_comments::no_warning_comments::no_warning_comments,
    },
    Rule {
        name: "semi",
        default_severity: RuleSeverity::Error,
        formatting: true,
        check: semi::semi::semi,
    },
];

/// Produces the findings of one file. Called from several threads at once.
pub trait LintEngine: Sync {
    fn lint(&self, source: &str, config: &EffectiveConfig) -> Vec<Finding>;
}

/// The rules shipped with sift.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEngine;

impl LintEngine for BuiltinEngine {
    fn lint(&self, source: &str, config: &EffectiveConfig) -> Vec<Finding> {
        let scanned = scan(source);
        let mut findings: Vec<Finding> = RULES
            .iter()
            .filter_map(|rule| rule.severity(config).map(|severity| (rule, severity)))
            .flat_map(|(rule, severity)| (rule.check)(&scanned, config, severity))
            .collect();
        findings.sort();
        findings
    }
}
