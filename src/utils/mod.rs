pub mod exec;
pub mod file;
pub mod logging;
pub mod naming;

pub use file::{copy_no_clobber, ensure_directory_exists, files_identical, CopyOutcome};
pub use naming::{collapse_repetition, sanitize};
