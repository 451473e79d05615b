use crate::args::Args;
use crate::status::ExitStatus;

pub mod args;
pub mod commands;
pub mod logging;
pub mod output_format;
pub mod status;

pub use output_format::{CompactEmitter, JsonEmitter, Reporter};

pub fn run(args: Args) -> anyhow::Result<ExitStatus> {
    let no_color = std::env::var("NO_COLOR").is_ok();
    if no_color {
        colored::control::set_override(false);
    }

    logging::init_logging(args.global_options.log_level.unwrap_or_default(), no_color);

    commands::check::check(args)
}
