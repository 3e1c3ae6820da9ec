//! Binary entry point for the vajeh CLI.

use clap::Parser;

use vajeh_cli::args::CloudArgs;

fn main() {
    let args = CloudArgs::parse();
    if let Err(err) = args.execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
