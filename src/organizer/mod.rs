//! Font placement and batch processing

pub mod batch;
pub mod cache;
pub mod discovery;
pub mod planner;

pub use batch::{read_batch_file, run_batch, BatchSummary};
pub use cache::refresh_font_cache;
pub use discovery::discover_fonts;
pub use planner::{build_target_path, place, plan, target_path};
