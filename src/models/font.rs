use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Family name some query tools print when a font declares none
pub const UNKNOWN_FAMILY_SENTINEL: &str = "Unknown Family";

/// A font file discovered on disk. Never modified by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    path: PathBuf,
    raw_file_name: OsString,
    file_name: String,
    extension: String,
}

impl FontFile {
    /// Wrap a path, capturing its file name verbatim and its extension in lowercase
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw_file_name = match path.file_name() {
            Some(name) => name.to_os_string(),
            None => return Err(Error::InvalidPath(path)),
        };
        let file_name = raw_file_name.to_string_lossy().into_owned();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        Ok(Self {
            path,
            raw_file_name,
            file_name,
            extension,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including its original case and extension, lossily decoded
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name exactly as the filesystem reported it
    pub fn file_name_os(&self) -> &OsStr {
        &self.raw_file_name
    }

    /// File name without its final extension
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 => &self.file_name[..idx],
            _ => &self.file_name,
        }
    }

    /// Lowercase extension, empty when the file has none
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// What a metadata query returned for one font file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontMetadata {
    /// Declared family name
    pub family_name: Option<String>,
    /// Codepoint coverage as whitespace separated hex `lo` or `lo-hi` ranges
    pub charset: Option<String>,
}

impl FontMetadata {
    /// Metadata for a font nothing could be learned about
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// The declared family, ignoring blanks and the "Unknown Family" sentinel
    pub fn family(&self) -> Option<&str> {
        self.family_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != UNKNOWN_FAMILY_SENTINEL)
    }

    /// The charset descriptor, if one was returned and is not blank
    pub fn charset(&self) -> Option<&str> {
        self.charset
            .as_deref()
            .map(str::trim)
            .filter(|charset| !charset.is_empty())
    }
}

/// Coarse container format, used as the first directory level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCategory {
    TrueType,
    OpenType,
    WebFonts,
    Type1,
    Unknown,
}

impl FormatCategory {
    /// Directory name for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatCategory::TrueType => "truetype",
            FormatCategory::OpenType => "opentype",
            FormatCategory::WebFonts => "webfonts",
            FormatCategory::Type1 => "type1",
            FormatCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FormatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of placing one font file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementDecision {
    /// Copied into the target directory
    Placed,
    /// A byte-identical file already sits at the target
    SkippedIdentical,
    /// A different file already sits at the target and was kept
    SkippedConflict,
    /// Directory creation or copy failed
    Failed,
}

impl fmt::Display for PlacementDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementDecision::Placed => write!(f, "placed"),
            PlacementDecision::SkippedIdentical => write!(f, "skipped (identical)"),
            PlacementDecision::SkippedConflict => write!(f, "skipped (conflict)"),
            PlacementDecision::Failed => write!(f, "failed"),
        }
    }
}
