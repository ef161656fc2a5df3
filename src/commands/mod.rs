//! Command dispatch and handlers.

pub mod delete;
pub mod install;
pub mod save;
pub mod uninstall;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::manifest::RequestSet;

/// Dispatch a parsed command to its handler.
///
/// When `PIPS_RECORD` names a directory, every shell and filesystem
/// interaction is recorded to a cassette below it.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    let Some(root) = &config.record_dir else {
        return dispatch_with_context(command, &ServiceContext::live(), config);
    };

    let (ctx, session) = ServiceContext::recording_at(root)?;
    let result = dispatch_with_context(command, &ctx, config);

    // Adapters hold the recorder; release them before finishing.
    drop(ctx);
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Install { target, pip_args } => install::run(ctx, config, target, pip_args),
        Command::Save(target) => save::run(ctx, config, target),
        Command::Uninstall { target, yes } => uninstall::run(ctx, config, target, *yes),
        Command::Delete(target) => delete::run(ctx, config, target),
    }
}

/// Parse the specifier arguments before anything runs.
fn requests(packages: &[String]) -> Result<RequestSet, String> {
    RequestSet::from_args(packages).map_err(|e| e.to_string())
}
