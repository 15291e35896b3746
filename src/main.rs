use clap::Parser;
use pipsignal::cli::{run, Cli};
use pipsignal::logging::init_logger;

fn main() -> std::process::ExitCode {
    init_logger("info");
    run(Cli::parse())
}
