use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use sift_core::CliOptions;
use sift_core::options::Space;

use crate::logging::LogLevel;
use crate::output_format::Reporter;

// Configures Clap v3-style help menu colors
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Clone, Debug, Parser)]
#[command(author, name = "sift", about = "sift: a JavaScript linter with sensible defaults")]
#[command(version)]
#[command(styles = STYLES)]
pub struct Args {
    #[arg(help = "Files, directories or globs to lint. Defaults to the current directory.")]
    pub files: Vec<String>,

    #[arg(
        long,
        value_name = "VALUE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_space,
        help = "Indent with spaces instead of tabs, optionally giving the width (`--space=4`)."
    )]
    pub space: Option<Space>,
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Require semicolons (`--semicolon=false` to forbid them)."
    )]
    pub semicolon: Option<bool>,
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Leave formatting rules to Prettier."
    )]
    pub prettier: Option<bool>,
    #[arg(long, value_name = "RANGE", help = "Range of Node.js versions to support, for example `>=18`.")]
    pub node_version: Option<String>,
    #[arg(long = "env", value_name = "ENV", help = "Environment to enable. Can be repeated.")]
    pub envs: Vec<String>,
    #[arg(long = "global", value_name = "NAME", help = "Additional global variable. Can be repeated.")]
    pub globals: Vec<String>,
    #[arg(long = "plugin", value_name = "NAME", help = "Plugin to load. Can be repeated.")]
    pub plugins: Vec<String>,
    #[arg(long = "extension", value_name = "EXT", help = "Additional extension to lint. Can be repeated.")]
    pub extensions: Vec<String>,
    #[arg(long = "extend", value_name = "PRESET", help = "Preset to extend. Can be repeated.")]
    pub extends: Vec<String>,
    #[arg(long = "ignore", value_name = "PATTERN", help = "Additional ignore pattern. Can be repeated.")]
    pub ignores: Vec<String>,
    #[arg(long, default_value = "false", help = "Only report errors.")]
    pub quiet: bool,
    #[arg(
        long,
        default_value = "false",
        help = "Do not apply the default set of ignored directories and files."
    )]
    pub no_default_ignore: bool,
    #[arg(
        long,
        value_enum,
        default_value_t = Reporter::default(),
        help = "Format used to report findings."
    )]
    pub reporter: Reporter,
    #[arg(long, value_name = "DIR", help = "Working directory to lint from.")]
    pub cwd: Option<PathBuf>,
    #[arg(
        long,
        value_name = "FILE",
        help = "Print the configuration resolved for FILE as JSON and exit."
    )]
    pub print_config: Option<PathBuf>,
    #[arg(long, default_value = "false", help = "Lint source read from standard input.")]
    pub stdin: bool,
    #[arg(
        long,
        value_name = "NAME",
        default_value = "<text>",
        help = "File name used for the source read from standard input."
    )]
    pub stdin_filename: String,
    #[arg(long, default_value = "false", help = "Show the time taken by the linter.")]
    pub with_timing: bool,

    #[clap(flatten)]
    pub(crate) global_options: GlobalOptions,
}

/// All configuration options that can be passed "globally"
#[derive(Clone, Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub(crate) struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LogLevel>,
}

fn parse_space(value: &str) -> Result<Space, String> {
    Space::parse(value).map_err(|err| err.to_string())
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values.to_vec()) }
}

impl Args {
    /// The options given on the command line. Flags that were not passed are
    /// left unset so that they never shadow the configuration.
    pub fn cli_options(&self) -> CliOptions {
        CliOptions {
            space: self.space,
            semicolon: self.semicolon,
            prettier: self.prettier,
            node_version: self.node_version.clone(),
            envs: non_empty(&self.envs),
            globals: non_empty(&self.globals),
            plugins: non_empty(&self.plugins),
            extensions: non_empty(&self.extensions),
            rules: None,
            quiet: self.quiet.then_some(true),
        }
    }
}
