//! Change command validation.
//!
//! Given a running config, a change command list, and the config expected
//! after the change, checks that every difference between running and
//! expected is explained by some command, and that every command shows up
//! in the difference.
//!
//! # Example
//! ```ignore
//! use config_lens::validate::{validate, ValidateOptions};
//!
//! let result = validate(&running, &change, &expected, &ValidateOptions::default())?;
//! if !result.is_valid {
//!     for row in result.unexplained_rows() {
//!         eprintln!("unexplained: {:?}", result.rows.row(row));
//!     }
//! }
//! ```

mod engine;
mod keymap;
mod schema;

// Public API exports
pub use engine::{validate, validate_with_model, ValidateOptions};
pub use keymap::{build_key_maps, parse_change_commands, ChangeCommand, ChangeKeyMaps, KeyMap};
pub use schema::{ChangeType, ValidateResult};
