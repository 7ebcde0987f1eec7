//! # feet-sync
//!
//! Manifest synchronization and the command pipeline.
//!
//! Call [`sync_manifest`] to regenerate the project manifest from the base
//! manifest and the registry, or go through [`pipeline`] to run a full
//! `add` / `remove` / `sync` command.

pub mod diff;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod writer;

pub use diff::{diff_manifest, ManifestDiff};
pub use error::SyncError;
pub use manifest::{Manifest, Placement};
pub use writer::{sync_manifest, WriteResult};
