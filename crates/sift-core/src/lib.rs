//! Configuration resolution, file admission and the built-in rules of the sift
//! linter.

pub mod admission;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod ignore_set;
pub mod lints;
pub mod options;
pub mod overrides;
pub mod pattern;
pub mod report;
pub mod settings;
pub mod utils;


pub use admission::{AdmissionDecision, AdmissionRequest, Workspace};
pub use config::{CliOptions, EffectiveConfig};
pub use error::{AdmissionError, ConfigError, OptionError};
pub use lints::{BuiltinEngine, LintEngine};
pub use report::FileReport;
