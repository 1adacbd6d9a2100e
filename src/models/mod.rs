//! Data types shared by the classifier, planner and batch driver

pub mod config;
pub mod font;

pub use config::{Config, MetadataBackend};
pub use font::{FontFile, FontMetadata, FormatCategory, PlacementDecision, UNKNOWN_FAMILY_SENTINEL};
