use std::fmt::{self, Display};
use std::io::Write;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use sift_core::FileReport;
use sift_core::diagnostic::Severity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum Reporter {
    /// Print findings one per line, followed by a summary
    #[default]
    Compact,
    /// Print one JSON record per linted file
    Json,
}

impl Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

pub trait Emitter {
    fn emit<W: Write>(&self, writer: &mut W, reports: &[FileReport]) -> anyhow::Result<()>;
}

pub struct CompactEmitter;

impl Emitter for CompactEmitter {
    fn emit<W: Write>(&self, writer: &mut W, reports: &[FileReport]) -> anyhow::Result<()> {
        let mut errors = 0;
        let mut warnings = 0;

        for report in reports {
            errors += report.error_count;
            warnings += report.warning_count;
            for finding in &report.messages {
                let label = match finding.severity {
                    Severity::Error => finding.severity.label().red(),
                    Severity::Warning => finding.severity.label().yellow(),
                };
                writeln!(
                    writer,
                    "{}: line {}, col {}, {label} - {} ({})",
                    report.file_path.white(),
                    finding.line,
                    finding.column,
                    finding.message,
                    finding.rule_id.dimmed()
                )?;
            }
        }

        if errors + warnings == 0 {
            writeln!(writer, "All checks passed!")?;
        } else {
            writeln!(writer)?;
            writeln!(writer, "Found {} and {}.", plural(errors, "error"), plural(warnings, "warning"))?;
        }
        Ok(())
    }
}

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn emit<W: Write>(&self, writer: &mut W, reports: &[FileReport]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, reports)?;
        writeln!(writer)?;
        Ok(())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 { format!("1 {noun}") } else { format!("{count} {noun}s") }
}
