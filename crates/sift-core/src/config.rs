//! Fully resolved options for one file.

use std::collections::BTreeMap;

use serde::Serializer;

use crate::error::OptionError;
use crate::fs::DEFAULT_EXTENSIONS;
use crate::options::{LintOptions, RuleSeverity, Space};

/// Options set on the command line. Only flags the user passed are present.
pub type CliOptions = LintOptions;

pub const DEFAULT_ENVS: &[&str] = &["es2021", "node"];
pub const DEFAULT_SPACE_WIDTH: u32 = 2;
pub const DEFAULT_NODE_VERSION: &str = "*";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tabs,
    Spaces(u32),
}

impl From<Space> for Indent {
    fn from(space: Space) -> Self {
        match space {
            Space::Enabled(false) => Indent::Tabs,
            Space::Enabled(true) => Indent::Spaces(DEFAULT_SPACE_WIDTH),
            Space::Width(width) => Indent::Spaces(width),
        }
    }
}

impl serde::Serialize for Indent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Indent::Tabs => serializer.serialize_str("tab"),
            Indent::Spaces(width) => serializer.serialize_u32(*width),
        }
    }
}

/// The options a file is linted with. Every option has a value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub indent: Indent,
    pub semicolon: bool,
    pub prettier: bool,
    pub node_version: String,
    pub envs: Vec<String>,
    pub globals: Vec<String>,
    pub plugins: Vec<String>,
    pub extensions: Vec<String>,
    pub rules: BTreeMap<String, RuleSeverity>,
    pub quiet: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            semicolon: true,
            prettier: false,
            node_version: DEFAULT_NODE_VERSION.to_string(),
            envs: strings(DEFAULT_ENVS),
            globals: Vec::new(),
            plugins: Vec::new(),
            extensions: strings(DEFAULT_EXTENSIONS),
            rules: BTreeMap::new(),
            quiet: false,
        }
    }
}

impl EffectiveConfig {
    /// Layer the command-line options on top of the options coming from the
    /// configuration file (overrides already applied), then fill every option
    /// left unset with its default.
    pub fn resolve(file: &LintOptions, cli: &CliOptions) -> Result<Self, OptionError> {
        let merged = file.clone().merge(cli.clone());
        merged.validate()?;
        Ok(Self::with_defaults(merged))
    }

    fn with_defaults(options: LintOptions) -> Self {
        let defaults = EffectiveConfig::default();
        Self {
            indent: options.space.map(Indent::from).unwrap_or(defaults.indent),
            semicolon: options.semicolon.unwrap_or(defaults.semicolon),
            prettier: options.prettier.unwrap_or(defaults.prettier),
            node_version: options.node_version.unwrap_or(defaults.node_version),
            envs: extend_defaults(defaults.envs, options.envs),
            globals: options.globals.unwrap_or_default(),
            plugins: options.plugins.unwrap_or_default(),
            extensions: extend_defaults(defaults.extensions, options.extensions),
            rules: options.rules.unwrap_or_default(),
            quiet: options.quiet.unwrap_or(defaults.quiet),
        }
    }

    /// Severity configured for `rule`, if the configuration mentions it.
    pub fn rule_severity(&self, rule: &str) -> Option<RuleSeverity> {
        self.rules.get(rule).copied()
    }
}

fn extend_defaults(mut defaults: Vec<String>, configured: Option<Vec<String>>) -> Vec<String> {
    for value in configured.into_iter().flatten() {
        // Extensions may be written with their leading dot.
        let value = value.strip_prefix('.').map(str::to_string).unwrap_or(value);
        if !defaults.contains(&value) {
            defaults.push(value);
        }
    }
    defaults
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
