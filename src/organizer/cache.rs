use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::utils::exec;

const FC_CACHE: &str = "fc-cache";

/// Rebuild the fontconfig cache for the organized directory.
///
/// Returns `Ok(false)` when `fc-cache` is not installed.
pub fn refresh_font_cache(base_path: &Path) -> Result<bool> {
    let Some(program) = exec::find_program(FC_CACHE) else {
        warn!("{} not found, skipping font cache refresh", FC_CACHE);
        return Ok(false);
    };

    info!("Refreshing font cache for {}", base_path.display());
    let base = base_path.to_string_lossy();
    exec::run(&program.to_string_lossy(), &["-f", &base])?;
    Ok(true)
}
