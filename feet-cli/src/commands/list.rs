//! `feet list` — registered features and whether their directories exist.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use feet_core::{registry, Config};

/// Arguments for `feet list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled, Serialize)]
struct FeatureRow {
    #[tabled(rename = "feature")]
    path: String,
    #[tabled(rename = "mode")]
    mode: String,
    #[tabled(rename = "on disk")]
    on_disk: bool,
}

impl ListArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let reg = registry::load(config)?;
        let rows: Vec<FeatureRow> = reg
            .features
            .iter()
            .map(|f| FeatureRow {
                path: f.path.to_string(),
                mode: f.mode.to_string(),
                on_disk: config.feature_dir(&f.path).is_dir(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize feature list")?
            );
            return Ok(());
        }

        if rows.is_empty() {
            println!("No features registered.");
            println!("Run: feet add <feature>");
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
