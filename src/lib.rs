//! Core library entry for the `pips` CLI.
//!
//! `pips` wraps `pip install` / `pip uninstall` and keeps a requirements
//! file in step with what is actually installed.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod inventory;
pub mod logging;
pub mod manifest;
pub mod pip;
pub mod ports;
pub mod specifier;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are not failures.
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose, cli.quiet);
    let config = config::Config::from_env();
    commands::dispatch(&cli.command, &config)
}
