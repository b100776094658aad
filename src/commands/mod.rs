//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod compare;
pub mod folder;
pub mod models;
pub mod utils;
pub mod validate;

// Re-export main command functions
pub use compare::execute_compare;
pub use folder::{execute_folder, FileDiffEntry, FileStatus, FolderDiffScanner};
pub use models::{CompareArgs, FolderArgs, OutputFormat, ValidateArgs};
pub use utils::{display_platforms, display_version, read_config_text};
pub use validate::execute_validate;
