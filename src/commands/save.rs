//! `pips save` command.

use crate::cli::Target;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::inventory::InventoryIndex;
use crate::manifest::save_packages;
use crate::pip;

/// Pin already installed packages in the manifest.
///
/// # Errors
///
/// Returns an error string if a specifier is malformed, `pip inspect`
/// fails, or any package could not be saved.
pub fn run(ctx: &ServiceContext, config: &Config, target: &Target) -> Result<(), String> {
    let requests = super::requests(&target.packages)?;
    let report = pip::inspect(ctx, &config.python).map_err(|e| e.to_string())?;
    let index = InventoryIndex::from_report(&report);
    save_packages(ctx.fs.as_ref(), config.manifest(target.dev), &index, &requests)
        .map_err(|e| e.to_string())
}
