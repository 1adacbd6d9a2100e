use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};
use crate::models::{Config, MetadataBackend};
use crate::organizer::read_batch_file;

const AFTER_HELP: &str = "\
Fonts are copied (never moved) to <BASE>/<format>/<family>/<file name>, where
<format> is one of truetype, opentype, webfonts, type1 or unknown and <family>
is a lowercase name derived from the font's metadata or, failing that, its file
name. Nerd Font variants get their own family directory ending in NF.
An existing file at the target is never overwritten.";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "fontcanon", version)]
#[command(about = "Sort font files into a format/family directory layout")]
#[command(after_help = AFTER_HELP)]
pub struct Args {
    /// Directories to scan for font files
    #[arg(value_name = "DIRECTORY", required_unless_present = "batch")]
    pub sources: Vec<PathBuf>,

    /// Process directories listed in a file, one per line
    #[arg(long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Destination root [default: the user font directory]
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Where font metadata comes from: auto, fc-query, native or none
    #[arg(long, value_name = "BACKEND", default_value = "auto")]
    pub metadata: MetadataBackend,

    /// Worker threads used for metadata queries
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Run fc-cache on the destination after placing fonts
    #[arg(long)]
    pub refresh_cache: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Build the run configuration, reading the batch file if one was given
    pub fn into_config(self) -> Result<Config> {
        let base_path = match self.base {
            Some(base) => base,
            None => Config::default_base_path()?,
        };

        let mut sources = self.sources;
        if let Some(batch_file) = &self.batch {
            sources.extend(read_batch_file(batch_file)?);
        }
        if sources.is_empty() {
            return Err(Error::Config("no source directories given".to_string()));
        }
        if self.jobs == Some(0) {
            return Err(Error::Config("--jobs must be at least 1".to_string()));
        }

        Ok(Config {
            debug_mode: self.debug,
            base_path,
            sources,
            metadata_backend: self.metadata,
            jobs: self.jobs,
            refresh_cache: self.refresh_cache,
        })
    }
}
