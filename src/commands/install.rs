//! `pips install` command.

use crate::cli::Target;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::inventory::InventoryIndex;
use crate::manifest::save_packages;
use crate::pip;

/// Install packages with pip, then pin them in the manifest.
///
/// Manifest failures (not installed, already listed) are printed but do not
/// fail the command once pip has succeeded.
///
/// # Errors
///
/// Returns an error string if a specifier is malformed or pip fails.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    target: &Target,
    pip_args: &[String],
) -> Result<(), String> {
    let requests = super::requests(&target.packages)?;
    pip::install(ctx, &config.python, &target.packages, pip_args).map_err(|e| e.to_string())?;

    let report = pip::inspect(ctx, &config.python).map_err(|e| e.to_string())?;
    let index = InventoryIndex::from_report(&report);
    let manifest = config.manifest(target.dev);
    if let Err(err) = save_packages(ctx.fs.as_ref(), manifest, &index, &requests) {
        tracing::warn!(
            failures = err.failures().len(),
            manifest = %manifest.display(),
            "installed, but the manifest was not fully updated"
        );
        eprintln!("{err}");
    }
    Ok(())
}
