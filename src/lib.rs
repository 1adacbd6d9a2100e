//! fontcanon sorts font files into a `<format>/<family>/` layout that
//! fontconfig can index.
//!
//! The classification core is [`font::classify`], [`font::is_nerd_font`] and
//! [`font::resolve_family`]; [`organizer::plan`] combines them to place a
//! single file and [`organizer::run_batch`] drives a whole run.

pub mod cli;
pub mod error;
pub mod font;
pub mod models;
pub mod organizer;
pub mod utils;

pub use error::{Error, Result};
