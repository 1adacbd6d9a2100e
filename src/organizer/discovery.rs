use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::font::is_font_extension;
use crate::models::FontFile;

/// Recursively collect font files under each source directory.
///
/// Anything inside `exclude` (normally the destination layout) is skipped so a
/// source that contains the destination is not re-imported. Missing sources
/// and unreadable entries are logged and skipped. The result is sorted and
/// free of duplicates, so placement order does not depend on the walk order.
pub fn discover_fonts(sources: &[PathBuf], exclude: &Path) -> Vec<FontFile> {
    let exclude = fs::canonicalize(exclude).unwrap_or_else(|_| exclude.to_path_buf());
    let mut found: Vec<PathBuf> = Vec::new();

    for source in sources {
        let root = match fs::canonicalize(source) {
            Ok(root) if root.is_dir() => root,
            _ => {
                warn!("'{}' is not a valid directory, skipping", source.display());
                continue;
            }
        };

        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| !entry.path().starts_with(&exclude));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(is_font_extension);

            if entry.file_type().is_file() && is_font {
                found.push(path.to_path_buf());
            }
        }
    }

    found.sort();
    found.dedup();
    debug!("Discovered {} font files", found.len());

    found
        .into_iter()
        .filter_map(|path| FontFile::new(path).ok())
        .collect()
}
