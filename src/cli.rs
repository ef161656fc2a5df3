//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `pips`.
#[derive(Debug, Parser)]
#[command(
    name = "pips",
    version,
    about = "Install pip packages and keep requirements files in sync"
)]
pub struct Cli {
    /// Log debug output, including the pip commands that run.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Manifest selection and package specifiers shared by every command.
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Use the development requirements file instead of the primary one.
    #[arg(short, long)]
    pub dev: bool,
    /// Requirement specifiers, e.g. `starlette[full]==0.25.0`.
    #[arg(required = true, value_name = "SPECIFIER")]
    pub packages: Vec<String>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install packages with pip and add them to requirements.txt.
    #[command(visible_alias = "i")]
    Install {
        /// Packages and manifest.
        #[command(flatten)]
        target: Target,
        /// Extra arguments passed to `pip install` after `--`.
        #[arg(last = true, value_name = "PIP_ARGS")]
        pip_args: Vec<String>,
    },
    /// Add already installed packages to requirements.txt.
    #[command(visible_alias = "s")]
    Save(Target),
    /// Uninstall packages with pip and remove them from requirements.txt.
    #[command(visible_aliases = ["remove", "rm", "u"])]
    Uninstall {
        /// Packages and manifest.
        #[command(flatten)]
        target: Target,
        /// Do not ask pip for confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove packages from requirements.txt without uninstalling them.
    #[command(visible_alias = "d")]
    Delete(Target),
}
