use std::process::ExitCode;

use clap::Parser;
use sift::args::Args;
use sift::status::ExitStatus;

fn main() -> ExitCode {
    let args = Args::parse();
    match sift::run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitStatus::Error.into()
        }
    }
}
