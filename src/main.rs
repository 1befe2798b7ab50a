//! uv-tidy CLI - find and remove unused uv virtual environments
//!
//! Usage: uv-tidy [OPTIONS]
//!
//! Reports removal candidates by default; `--yes` deletes them and
//! `--interactive` asks first.

mod commands;
mod logging;
mod ui;

use clap::Parser;

use uv_tidy::presentation::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    if let Err(err) = commands::tidy::cmd_tidy(&cli) {
        ui::output::print_error(&err, cli.json);
        std::process::exit(1);
    }
}
