//! feet core library — domain types, configuration, registry persistence and
//! the feature lifecycle.
//!
//! - [`types`] — [`Feature`], [`FeatureMode`], [`Registry`]
//! - [`config`] — `feet.json` resolution into a [`Config`]
//! - [`registry`] — load / save of the feature registry
//! - [`lifecycle`] — add / remove of feature directories
//! - [`error`] — [`FeetError`]

pub mod config;
pub mod error;
pub mod json;
pub mod lifecycle;
pub mod registry;
pub mod types;

pub use config::{Config, PartialConfig};
pub use error::FeetError;
pub use lifecycle::{AddOptions, AddOutcome, RemoveOutcome};
pub use types::{Feature, FeatureMode, FeaturePath, Registry};
