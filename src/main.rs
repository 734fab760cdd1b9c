use clap::Parser;
use emabacktest::cli::{run, Cli};
use emabacktest::logging::init_logging;

fn main() -> std::process::ExitCode {
    init_logging();
    run(Cli::parse())
}
