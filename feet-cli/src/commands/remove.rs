//! `feet remove <feature> [--preserve]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use feet_core::Config;
use feet_sync::pipeline;

use super::{display_path, print_manifest_result};

/// Remove an existing feature.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// The name of the feature, a path relative to the root directory.
    pub feature: String,

    /// Preserve the source directory.
    #[arg(long, short = 'p')]
    pub preserve: bool,
}

impl RemoveArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let outcome = pipeline::remove(config, &self.feature, self.preserve)?;

        println!(
            "{} Removed {} feature '{}'",
            "✓".green(),
            outcome.feature.mode,
            outcome.feature.path
        );
        if self.preserve {
            println!("  {}", "source directory preserved".dimmed());
        }
        for dir in &outcome.directories {
            println!("  -  {}", display_path(config, dir));
        }
        print_manifest_result(config, &outcome.manifest);
        Ok(())
    }
}
