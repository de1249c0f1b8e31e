//! rbo CLI binary.
//!
//! Compares two ranked lists given on the command line and prints the
//! requested measure. Progress of the depth scans goes to the log (stderr);
//! results go to stdout.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use rbo::cli::args::RboArgs;
use rbo::cli::commands::execute_command;

fn main() {
    let args = RboArgs::parse();

    // The logger itself passes every record; the global max level is the
    // gate, so a command can still raise it (e.g. a verbose config file).
    Builder::new()
        .filter_level(LevelFilter::Trace)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
    log::set_max_level(args.log_level());

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
