//! `feet add <feature> [--server] [--client] [--shared]`

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use feet_core::{lifecycle::AddOptions, Config};
use feet_sync::pipeline;

use super::{display_path, print_manifest_result};

/// Add a new feature.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// The name of the feature, a path relative to the root directory.
    pub feature: String,

    /// Server only feature.
    #[arg(long, short = 's')]
    pub server: bool,

    /// Client only feature.
    #[arg(long, short = 'c')]
    pub client: bool,

    /// Generate a shared folder in a feature (also accepted as `-sh`).
    #[arg(long)]
    pub shared: bool,
}

impl AddArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let options = AddOptions {
            server: self.server,
            client: self.client,
            shared: self.shared,
        };
        let outcome = pipeline::add(config, &self.feature, options)?;

        println!(
            "{} Added {} feature '{}'",
            "✓".green(),
            outcome.feature.mode,
            outcome.feature.path
        );
        for dir in &outcome.directories {
            println!("  +  {}", display_path(config, dir));
        }
        print_manifest_result(config, &outcome.manifest);
        Ok(())
    }
}
