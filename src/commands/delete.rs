//! `pips delete` command.

use crate::cli::Target;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::manifest::remove_packages;

/// Drop packages from the manifest without touching the environment.
///
/// # Errors
///
/// Returns an error string if a specifier is malformed or the manifest
/// cannot be rewritten.
pub fn run(ctx: &ServiceContext, config: &Config, target: &Target) -> Result<(), String> {
    let requests = super::requests(&target.packages)?;
    remove_packages(ctx.fs.as_ref(), config.manifest(target.dev), &requests)
        .map_err(|e| e.to_string())
}
