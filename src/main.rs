//! Pixscene - Command-line tool for rendering pixel scene descriptions to PNG

use std::process::ExitCode;

use pixscene::cli;

fn main() -> ExitCode {
    cli::run()
}
