//! Binary entrypoint for the `pips` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match pips::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
