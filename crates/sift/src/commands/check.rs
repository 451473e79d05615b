use std::env;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use sift_core::check::check as lint_files;
use sift_core::fs::{absolutize, display_relative};
use sift_core::{AdmissionDecision, AdmissionRequest, BuiltinEngine, FileReport, LintEngine, Workspace};

use crate::args::Args;
use crate::output_format::{CompactEmitter, Emitter, JsonEmitter, Reporter};
use crate::status::ExitStatus;

pub fn check(args: Args) -> Result<ExitStatus> {
    let start = if args.with_timing { Some(Instant::now()) } else { None };

    let current_dir = env::current_dir().context("Failed to read the current directory")?;
    let cwd = match &args.cwd {
        Some(dir) => absolutize(dir, &current_dir),
        None => current_dir,
    };

    let request = AdmissionRequest {
        cwd,
        cli: args.cli_options(),
        extends: args.extends.clone(),
        ignores: args.ignores.clone(),
        no_default_ignore: args.no_default_ignore,
    };
    let workspace = Workspace::load(request)?;
    if let Some(config_path) = workspace.config_path() {
        tracing::debug!("Using configuration {}", config_path.display());
    }

    if let Some(file) = &args.print_config {
        return print_config(&workspace, file);
    }

    let reports = if args.stdin {
        vec![lint_stdin(&workspace, &args.stdin_filename)?]
    } else {
        let decisions = workspace.admit(&args.files)?;
        // `lint_files` keeps the order of admitted decisions.
        let configs = decisions.iter().filter_map(|decision| match decision {
            AdmissionDecision::Admit { config, .. } => Some(config),
            AdmissionDecision::Reject { .. } => None,
        });

        let mut reports = Vec::new();
        let mut failed = false;
        for ((path, result), config) in lint_files(&BuiltinEngine, &decisions).into_iter().zip(configs) {
            match result {
                Ok(findings) => {
                    let file_path = display_relative(&path, workspace.cwd());
                    reports.push(FileReport::new(file_path, findings, config.quiet));
                }
                Err(err) => {
                    failed = true;
                    eprintln!("{}: {err:#}", "Error".red().bold());
                }
            }
        }
        // A partial report would read as a complete one.
        if failed {
            return Ok(ExitStatus::Error);
        }
        reports
    };

    emit(args.reporter, &reports)?;

    if let Some(start) = start {
        eprintln!("Checked files in: {:?}", start.elapsed());
    }

    if reports.iter().any(|report| report.error_count > 0) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn print_config(workspace: &Workspace, file: &Path) -> Result<ExitStatus> {
    let path = absolutize(file, workspace.cwd());
    let config = workspace.config_for(&path)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &config)?;
    writeln!(stdout)?;
    Ok(ExitStatus::Success)
}

fn lint_stdin(workspace: &Workspace, name: &str) -> Result<FileReport> {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read standard input")?;

    let Some(config) = workspace.admit_stdin(Path::new(name))? else {
        return Ok(FileReport::new(name.to_string(), Vec::new(), false));
    };
    let findings = BuiltinEngine.lint(&source, &config);
    Ok(FileReport::new(name.to_string(), findings, config.quiet))
}

fn emit(reporter: Reporter, reports: &[FileReport]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match reporter {
        Reporter::Compact => CompactEmitter.emit(&mut stdout, reports),
        Reporter::Json => JsonEmitter.emit(&mut stdout, reports),
    }
}
