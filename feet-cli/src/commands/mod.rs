pub mod add;
pub mod list;
pub mod remove;
pub mod sync;

use std::path::Path;

use feet_core::Config;
use feet_sync::WriteResult;

/// `path` relative to the working directory, for display.
pub(crate) fn display_path<'a>(config: &Config, path: &'a Path) -> std::path::Display<'a> {
    path.strip_prefix(&config.work_dir).unwrap_or(path).display()
}

pub(crate) fn print_manifest_result(config: &Config, result: &WriteResult) {
    let path = display_path(config, result.path());
    match result {
        WriteResult::Written { .. } => println!("  ✎  {path}"),
        WriteResult::WouldWrite { .. } => println!("  ~  {path}"),
        WriteResult::Unchanged { .. } => println!("  ·  {path} (unchanged)"),
    }
}
