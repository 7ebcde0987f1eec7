//! `feet sync` — regenerate the project file without touching features.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use feet_core::Config;
use feet_sync::pipeline;

use super::print_manifest_result;

/// Arguments for `feet sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show the diff that would be written without writing it.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let outcome = pipeline::sync(config, self.dry_run)?;
        let prefix = if self.dry_run { "[dry-run] " } else { "" };

        println!(
            "{prefix}{} Synced {} feature(s) into '{}'",
            "✓".green(),
            outcome.registry.features.len(),
            config.project
        );
        print_manifest_result(config, &outcome.manifest);

        if let Some(diff) = outcome.diff {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
