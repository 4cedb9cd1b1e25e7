//! intentbot command line front-end.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use intentbot::cli::args::*;
use intentbot::cli::commands::*;

fn main() {
    let args = IntentBotArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .parse_env("INTENTBOT_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
