use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::font::{resolve_family_with, MetadataProvider};
use crate::models::{Config, FontFile, PlacementDecision};
use crate::utils::ensure_directory_exists;

use super::cache::refresh_font_cache;
use super::discovery::discover_fonts;
use super::planner::{build_target_path, place};

/// Per-run placement counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub placed: usize,
    pub skipped_identical: usize,
    pub skipped_conflict: usize,
    pub failed: usize,
    /// The run stopped early because cancellation was requested
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn record(&mut self, decision: PlacementDecision) {
        match decision {
            PlacementDecision::Placed => self.placed += 1,
            PlacementDecision::SkippedIdentical => self.skipped_identical += 1,
            PlacementDecision::SkippedConflict => self.skipped_conflict += 1,
            PlacementDecision::Failed => self.failed += 1,
        }
    }

    /// Number of fonts a decision was reached for
    pub fn processed(&self) -> usize {
        self.placed + self.skipped_identical + self.skipped_conflict + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Font organization summary:")?;
        writeln!(f, "  - {} fonts placed", self.placed)?;
        writeln!(f, "  - {} already present", self.skipped_identical)?;
        writeln!(f, "  - {} skipped (different file at target)", self.skipped_conflict)?;
        write!(f, "  - {} failed", self.failed)?;
        if self.cancelled {
            write!(f, "\n  (cancelled before all fonts were processed)")?;
        }
        Ok(())
    }
}

/// Read source directories from a batch file, one per line.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn read_batch_file(batch_file: &Path) -> Result<Vec<PathBuf>> {
    if !batch_file.is_file() {
        return Err(Error::InvalidPath(batch_file.to_path_buf()));
    }

    let content = fs::read_to_string(batch_file)?;
    let dirs: Vec<PathBuf> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect();

    info!("Found {} directories in {}", dirs.len(), batch_file.display());
    Ok(dirs)
}

/// Organize every font under the configured sources into `config.base_path`.
///
/// Family and format resolution runs in parallel; placement runs one file at a
/// time in sorted path order, so the first file in that order wins any
/// conflict. `cancel` is checked between files.
pub fn run_batch(
    config: &Config,
    provider: &dyn MetadataProvider,
    cancel: &AtomicBool,
) -> Result<BatchSummary> {
    ensure_directory_exists(&config.base_path)?;

    let fonts = discover_fonts(&config.sources, &config.base_path);
    info!(
        "Organizing {} fonts into {} using {} metadata",
        fonts.len(),
        config.base_path.display(),
        provider.name()
    );

    let targets = resolve_targets(&fonts, &config.base_path, provider, config.jobs, cancel)?;

    let mut summary = BatchSummary::default();
    for (font, target) in targets {
        if cancel.load(Ordering::SeqCst) {
            summary.cancelled = true;
            break;
        }
        let decision = place(&font, &target);
        debug!("{}: {}", font.file_name(), decision);
        summary.record(decision);
    }

    if summary.processed() < fonts.len() {
        summary.cancelled = true;
    }

    if config.refresh_cache && summary.placed > 0 && !summary.cancelled {
        if let Err(e) = refresh_font_cache(&config.base_path) {
            warn!("Font cache refresh failed: {}", e);
        }
    }

    Ok(summary)
}

/// Work out every target path, querying metadata for several fonts at once
fn resolve_targets(
    fonts: &[FontFile],
    base_path: &Path,
    provider: &dyn MetadataProvider,
    jobs: Option<usize>,
    cancel: &AtomicBool,
) -> Result<Vec<(FontFile, PathBuf)>> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = jobs {
        builder = builder.num_threads(jobs);
    }
    let pool = builder
        .build()
        .map_err(|e| Error::Config(format!("could not start worker pool: {}", e)))?;

    let targets: Vec<(FontFile, PathBuf)> = pool.install(|| {
        fonts
            .par_iter()
            .filter_map(|font| {
                if cancel.load(Ordering::SeqCst) {
                    return None;
                }
                let metadata = provider.query(font.path());
                let family = resolve_family_with(font, &metadata);
                Some((font.clone(), build_target_path(font, base_path, &family)))
            })
            .collect()
    });

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_decisions() {
        let mut summary = BatchSummary::default();
        summary.record(PlacementDecision::Placed);
        summary.record(PlacementDecision::Placed);
        summary.record(PlacementDecision::SkippedConflict);
        summary.record(PlacementDecision::Failed);
        assert_eq!(summary.placed, 2);
        assert_eq!(summary.skipped_conflict, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed(), 4);
        assert!(summary.to_string().contains("2 fonts placed"));
    }

    #[test]
    fn batch_file_skips_comments_and_blanks() {
        let temp = tempfile::tempdir().unwrap();
        let batch = temp.path().join("dirs.txt");
        fs::write(&batch, "# font repos\n/srv/fonts/nerd\n\n  /srv/fonts/google  \n").unwrap();

        let dirs = read_batch_file(&batch).unwrap();
        assert_eq!(
            dirs,
            vec![PathBuf::from("/srv/fonts/nerd"), PathBuf::from("/srv/fonts/google")]
        );
    }

    #[test]
    fn missing_batch_file_is_invalid_path() {
        let err = read_batch_file(Path::new("/nonexistent/dirs.txt")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }
}
