use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::font::{classify, resolve_family_with, MetadataProvider};
use crate::models::{FontFile, PlacementDecision};
use crate::utils::{copy_no_clobber, ensure_directory_exists, files_identical, CopyOutcome};

/// Where a font belongs: `<base>/<format>/<family>/<original file name>`
pub fn target_path(font: &FontFile, base_path: &Path, provider: &dyn MetadataProvider) -> PathBuf {
    let metadata = provider.query(font.path());
    let family = resolve_family_with(font, &metadata);
    build_target_path(font, base_path, &family)
}

/// Join the layout levels for an already resolved family
pub fn build_target_path(font: &FontFile, base_path: &Path, family: &str) -> PathBuf {
    base_path
        .join(classify(font.extension()).as_str())
        .join(family)
        .join(font.file_name_os())
}

/// Classify a font and copy it into the canonical layout under `base_path`
pub fn plan(font: &FontFile, base_path: &Path, provider: &dyn MetadataProvider) -> PlacementDecision {
    let target = target_path(font, base_path, provider);
    place(font, &target)
}

/// Copy a font to a precomputed target path.
///
/// An existing target is never overwritten: identical bytes are reported as
/// [`PlacementDecision::SkippedIdentical`], anything else as
/// [`PlacementDecision::SkippedConflict`]. Errors are logged and reported as
/// [`PlacementDecision::Failed`].
pub fn place(font: &FontFile, target: &Path) -> PlacementDecision {
    match try_place(font, target) {
        Ok(decision) => decision,
        Err(e) => {
            error!("Failed to place {}: {}", font.path().display(), e);
            PlacementDecision::Failed
        }
    }
}

fn try_place(font: &FontFile, target: &Path) -> Result<PlacementDecision> {
    if let Some(target_dir) = target.parent() {
        ensure_directory_exists(target_dir)?;
    }

    match copy_no_clobber(font.path(), target)? {
        CopyOutcome::Copied => {
            info!("Placed {} -> {}", font.path().display(), target.display());
            Ok(PlacementDecision::Placed)
        }
        CopyOutcome::AlreadyExists => compare_existing(font, target),
    }
}

fn compare_existing(font: &FontFile, target: &Path) -> Result<PlacementDecision> {
    if files_identical(font.path(), target)? {
        debug!("{} already present at {}", font.file_name(), target.display());
        Ok(PlacementDecision::SkippedIdentical)
    } else {
        warn!(
            "Keeping existing {}, it differs from {}",
            target.display(),
            font.path().display()
        );
        Ok(PlacementDecision::SkippedConflict)
    }
}
