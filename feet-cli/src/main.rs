//! feet — feature-based folder layout for Rojo projects.
//!
//! # Usage
//!
//! ```text
//! feet add <feature> [--server|-s] [--client|-c] [--shared|-sh]
//! feet remove <feature> [--preserve|-p]
//! feet sync [--dry-run]
//! feet list [--json]
//! ```
//!
//! Configuration is read from `feet.json` in the current directory.

mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{add::AddArgs, list::ListArgs, remove::RemoveArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "feet",
    version,
    about = "A command line tool to manage feature-based organization for your Rojo project.",
    long_about = None,
)]
struct Cli {
    /// Log each directory and manifest node touched.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a new feature.
    Add(AddArgs),

    /// Remove an existing feature.
    Remove(RemoveArgs),

    /// Regenerate the project file from the base project and the registry.
    Sync(SyncArgs),

    /// List registered features.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    let config = feet_core::config::load()?;
    match command {
        Commands::Add(args) => args.run(&config),
        Commands::Remove(args) => args.run(&config),
        Commands::Sync(args) => args.run(&config),
        Commands::List(args) => args.run(&config),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// clap only takes single-character short flags; `-sh` is spelled out.
/// Arguments after `--` are positional and left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut positional_only = false;
    args.into_iter()
        .map(|arg| {
            if positional_only {
                return arg;
            }
            if arg == "--" {
                positional_only = true;
                arg
            } else if arg == "-sh" {
                OsString::from("--shared")
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_shared_flag_is_rewritten() {
        let args = ["feet", "add", "combat", "-sh"].map(OsString::from);
        let cli = Cli::parse_from(normalize_args(args));
        match cli.command {
            Commands::Add(args) => assert!(args.shared),
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn short_shared_after_double_dash_is_a_feature_name() {
        let args = ["feet", "add", "--", "-sh"].map(OsString::from);
        let normalized = normalize_args(args);
        assert_eq!(normalized[3], OsString::from("-sh"));

        let cli = Cli::parse_from(normalized);
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.feature, "-sh");
                assert!(!args.shared);
            }
            other => panic!("expected add, got {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
