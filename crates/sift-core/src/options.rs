//! Partial lint options and the merge primitive shared by every layer.
//!
//! A [`LintOptions`] only holds what one source explicitly set: every field is
//! optional and nothing is defaulted here. Presets, the project config,
//! overrides and command-line flags are all `LintOptions`, layered with
//! [`LintOptions::merge`]. Defaults are applied once, at the very end, by
//! [`crate::config::EffectiveConfig`].

use std::collections::BTreeMap;
use std::fmt;

use semver::VersionReq;
use serde::de::{self, Deserializer, Visitor};

use crate::error::OptionError;

/// Options that can be set in a config file, in an override block, or on the
/// command line.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LintOptions {
    pub space: Option<Space>,
    pub semicolon: Option<bool>,
    pub prettier: Option<bool>,
    pub node_version: Option<String>,
    pub envs: Option<Vec<String>>,
    pub globals: Option<Vec<String>>,
    pub plugins: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub rules: Option<BTreeMap<String, RuleSeverity>>,
    pub quiet: Option<bool>,
}

impl LintOptions {
    /// Layer `higher` on top of `self`.
    ///
    /// - scalars: the value of `higher` wins when it is set;
    /// - lists: concatenated, `self` first, duplicates dropped;
    /// - `rules`: merged per rule, `higher` wins on the same rule.
    #[must_use]
    pub fn merge(self, higher: LintOptions) -> LintOptions {
        LintOptions {
            space: higher.space.or(self.space),
            semicolon: higher.semicolon.or(self.semicolon),
            prettier: higher.prettier.or(self.prettier),
            node_version: higher.node_version.or(self.node_version),
            envs: merge_lists(self.envs, higher.envs),
            globals: merge_lists(self.globals, higher.globals),
            plugins: merge_lists(self.plugins, higher.plugins),
            extensions: merge_lists(self.extensions, higher.extensions),
            rules: merge_rules(self.rules, higher.rules),
            quiet: higher.quiet.or(self.quiet),
        }
    }

    /// Check the values that can only be validated as a whole.
    pub fn validate(&self) -> Result<(), OptionError> {
        if let Some(version) = &self.node_version {
            parse_node_version(version)?;
        }
        Ok(())
    }
}

fn merge_lists(lower: Option<Vec<String>>, higher: Option<Vec<String>>) -> Option<Vec<String>> {
    match (lower, higher) {
        (None, higher) => higher,
        (lower, None) => lower,
        (Some(mut lower), Some(higher)) => {
            for value in higher {
                if !lower.contains(&value) {
                    lower.push(value);
                }
            }
            Some(lower)
        }
    }
}

fn merge_rules(
    lower: Option<BTreeMap<String, RuleSeverity>>,
    higher: Option<BTreeMap<String, RuleSeverity>>,
) -> Option<BTreeMap<String, RuleSeverity>> {
    match (lower, higher) {
        (None, higher) => higher,
        (lower, None) => lower,
        (Some(mut lower), Some(higher)) => {
            lower.extend(higher);
            Some(lower)
        }
    }
}

const COMPARATOR_OPERATORS: &[&str] = &[">=", "<=", ">", "<", "=", "~", "^"];

/// Parse a `node-version` range written with npm syntax: `||` separates
/// alternatives, spaces separate the comparators of one alternative, and
/// `A - B` is an inclusive range. A leading `v` before a digit is accepted, as
/// in `v18`.
pub fn parse_node_version(value: &str) -> Result<Vec<VersionReq>, OptionError> {
    value
        .split("||")
        .map(|alternative| {
            let candidate = comparator_set(alternative);
            VersionReq::parse(&candidate).map_err(|err| OptionError::NodeVersion {
                value: value.to_string(),
                reason: err.to_string(),
            })
        })
        .collect()
}

/// Rewrite one npm alternative as a comma-separated comparator list.
fn comparator_set(alternative: &str) -> String {
    let tokens: Vec<&str> = alternative.split_whitespace().collect();
    if tokens.is_empty() {
        return "*".to_string();
    }
    if let [lower, "-", upper] = tokens[..] {
        return format!(">={}, <={}", strip_v(lower), strip_v(upper));
    }

    let mut comparators = Vec::new();
    let mut pending_operator: Option<&str> = None;
    for token in tokens {
        if COMPARATOR_OPERATORS.contains(&token) {
            pending_operator = Some(token);
            continue;
        }
        let operator = pending_operator.take().unwrap_or_default();
        comparators.push(format!("{operator}{}", strip_v(token)));
    }
    if let Some(operator) = pending_operator {
        comparators.push(operator.to_string());
    }
    comparators.join(", ")
}

/// Drop the `v` of `v18` or `>=v18`.
fn strip_v(comparator: &str) -> String {
    let split = comparator.find(|c: char| !"<>=~^".contains(c)).unwrap_or(comparator.len());
    let (operator, version) = comparator.split_at(split);
    match version.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => format!("{operator}{rest}"),
        _ => comparator.to_string(),
    }
}

/// Indentation setting, as written by the user.
///
/// `true` means the default width of spaces, `false` means tabs, and a number
/// is an explicit width. The strings `"true"`, `"false"` and `"<digits>"` are
/// read exactly like their non-string counterparts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    Enabled(bool),
    Width(u32),
}

impl Space {
    pub fn parse(value: &str) -> Result<Self, OptionError> {
        match value.trim() {
            "true" => Ok(Space::Enabled(true)),
            "false" => Ok(Space::Enabled(false)),
            other => match other.parse::<u32>() {
                Ok(0) | Err(_) => Err(OptionError::Space(value.to_string())),
                Ok(width) => Ok(Space::Width(width)),
            },
        }
    }

    fn from_integer<E: de::Error>(value: i64) -> Result<Self, E> {
        match u32::try_from(value) {
            Ok(width) if width > 0 => Ok(Space::Width(width)),
            _ => Err(E::custom(OptionError::Space(value.to_string()))),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Space {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SpaceVisitor)
    }
}

struct SpaceVisitor;

impl Visitor<'_> for SpaceVisitor {
    type Value = Space;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, a positive integer, or one of them as a string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Space::Enabled(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Space::from_integer(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Space::from_integer(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Space::parse(value).map_err(E::custom)
    }
}

/// Severity configured for a rule, written as `"off"`, `"warn"`, `"error"` or
/// `0`, `1`, `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Off,
    Warn,
    Error,
}

impl<'de> serde::Deserialize<'de> for RuleSeverity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RuleSeverityVisitor)
    }
}

struct RuleSeverityVisitor;

impl Visitor<'_> for RuleSeverityVisitor {
    type Value = RuleSeverity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("one of \"off\", \"warn\", \"error\", 0, 1 or 2")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        match value {
            0 => Ok(RuleSeverity::Off),
            1 => Ok(RuleSeverity::Warn),
            2 => Ok(RuleSeverity::Error),
            _ => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        self.visit_i64(i64::try_from(value).unwrap_or(i64::MAX))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        match value {
            "off" => Ok(RuleSeverity::Off),
            "warn" => Ok(RuleSeverity::Warn),
            "error" => Ok(RuleSeverity::Error),
            _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
        }
    }
}
