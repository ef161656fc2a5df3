//! `pips uninstall` command.

use crate::cli::Target;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::manifest::remove_packages;
use crate::pip;

/// Uninstall packages with pip, then drop their lines from the manifest.
///
/// The manifest is only changed after pip reports success. Manifest
/// failures are printed but do not fail the command.
///
/// # Errors
///
/// Returns an error string if a specifier is malformed or pip fails.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    target: &Target,
    yes: bool,
) -> Result<(), String> {
    let requests = super::requests(&target.packages)?;
    pip::uninstall(ctx, &config.python, &target.packages, yes).map_err(|e| e.to_string())?;

    let manifest = config.manifest(target.dev);
    if let Err(err) = remove_packages(ctx.fs.as_ref(), manifest, &requests) {
        tracing::warn!(
            failures = err.failures().len(),
            manifest = %manifest.display(),
            "uninstalled, but the manifest was not updated"
        );
        eprintln!("{err}");
    }
    Ok(())
}
