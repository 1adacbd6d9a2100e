use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Configuration for one organization run
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable debug output
    pub debug_mode: bool,
    /// Root of the canonical layout fonts are copied into
    pub base_path: PathBuf,
    /// Directories scanned for font files
    pub sources: Vec<PathBuf>,
    /// Where font metadata comes from
    pub metadata_backend: MetadataBackend,
    /// Worker threads for metadata queries, `None` lets rayon decide
    pub jobs: Option<usize>,
    /// Run `fc-cache` on the base path after placing fonts
    pub refresh_cache: bool,
}

impl Config {
    /// Create a configuration with default settings for the given destination
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            debug_mode: false,
            base_path: base_path.into(),
            sources: Vec::new(),
            metadata_backend: MetadataBackend::Auto,
            jobs: None,
            refresh_cache: false,
        }
    }

    /// The per-user font directory, e.g. `~/.local/share/fonts`
    pub fn default_base_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("fonts"))
            .ok_or_else(|| Error::Config("could not determine the user data directory".to_string()))
    }
}

/// Metadata backends selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataBackend {
    /// `fc-query` when it is installed, otherwise the native reader
    #[default]
    Auto,
    /// The external fontconfig query tool
    FcQuery,
    /// In-process parsing with font-kit and ttf-parser
    Native,
    /// No metadata, filenames only
    None,
}

impl fmt::Display for MetadataBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataBackend::Auto => write!(f, "auto"),
            MetadataBackend::FcQuery => write!(f, "fc-query"),
            MetadataBackend::Native => write!(f, "native"),
            MetadataBackend::None => write!(f, "none"),
        }
    }
}

impl FromStr for MetadataBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(MetadataBackend::Auto),
            "fc-query" | "fcquery" => Ok(MetadataBackend::FcQuery),
            "native" => Ok(MetadataBackend::Native),
            "none" => Ok(MetadataBackend::None),
            other => Err(Error::Config(format!(
                "unknown metadata backend '{}', expected auto, fc-query, native or none",
                other
            ))),
        }
    }
}
