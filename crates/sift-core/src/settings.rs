//! The configuration object as authored by the user.

use crate::error::OptionError;
use crate::options::LintOptions;

/// A project configuration, read from `sift.toml` or from the `sift` key of a
/// `package.json`.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    #[serde(flatten)]
    pub options: LintOptions,
    /// Presets this configuration builds upon, lowest precedence first.
    pub extends: Option<OneOrMany>,
    /// Extra ignore patterns, relative to the project root.
    pub ignores: Option<Vec<String>>,
    pub overrides: Option<Vec<Override>>,
}

/// Options applied to the files matching `files`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Override {
    pub files: OneOrMany,
    #[serde(flatten)]
    pub options: LintOptions,
    /// Applied on top of this override, only to files matching both globs.
    #[serde(default)]
    pub overrides: Vec<Override>,
}

/// A string or a list of strings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

impl RawConfig {
    /// Layer `higher` on top of `self`, using the same rules as for overrides.
    /// Ignore patterns and override blocks are concatenated, `self` first.
    #[must_use]
    pub fn merge(self, higher: RawConfig) -> RawConfig {
        RawConfig {
            options: self.options.merge(higher.options),
            extends: higher.extends.or(self.extends),
            ignores: concat(self.ignores, higher.ignores),
            overrides: concat(self.overrides, higher.overrides),
        }
    }

    pub fn extends(&self) -> Vec<String> {
        self.extends.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }

    pub fn ignores(&self) -> &[String] {
        self.ignores.as_deref().unwrap_or_default()
    }

    pub fn overrides(&self) -> &[Override] {
        self.overrides.as_deref().unwrap_or_default()
    }

    /// Validate the base options and those of every override block.
    pub fn validate(&self) -> Result<(), OptionError> {
        self.options.validate()?;
        self.overrides()
            .iter()
            .try_for_each(Override::validate)
    }
}

impl Override {
    fn validate(&self) -> Result<(), OptionError> {
        self.options.validate()?;
        self.overrides.iter().try_for_each(Override::validate)
    }
}

fn concat<T>(lower: Option<Vec<T>>, higher: Option<Vec<T>>) -> Option<Vec<T>> {
    match (lower, higher) {
        (None, higher) => higher,
        (lower, None) => lower,
        (Some(mut lower), Some(higher)) => {
            lower.extend(higher);
            Some(lower)
        }
    }
}
