use clap::Parser;
use downsort::cli::{Args, run};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        downsort::output::print_error(&e);
    }
}
