//! Configuration and constants for the engine and the CLI.

use std::time::Duration;

/// Separator used when joining a hierarchical path into a path key
pub const PATH_SEPARATOR: &str = " > ";

/// Prefix that turns a command into its negated form
pub const NEGATION_PREFIX: &str = "no ";

/// Lines whose stripped text starts with this are comments
pub const COMMENT_PREFIX: &str = "!";

/// Marker carried by every injected VLAN annotation line
pub const VLAN_DIFF_ANNOTATION_MARKER: &str = "! [vlan diff]";

/// Keyword of the canonical VLAN trunk line (indent is prepended)
pub const VLAN_TRUNK_KEYWORD: &str = "switchport trunk allowed vlan";

/// Minimum similarity before an orphan delete/insert pair gets inline hints
pub const DEFAULT_INLINE_DIFF_THRESHOLD: f32 = 0.4;

/// Default timeout for a single CLI comparison
pub const DEFAULT_COMPARE_TIMEOUT: Duration = Duration::from_secs(30);

/// Current JSON report schema version
pub const REPORT_VERSION: &str = "1.0.0";

// Process exit codes used by the CLI
pub const EXIT_NO_DIFF: i32 = 0;
pub const EXIT_DIFF: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
