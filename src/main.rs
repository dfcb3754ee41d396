mod args;
mod calc;

use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    if let Err(e) = calc::run(&args) {
        error!("Allocation failed: {:?}", e);
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
