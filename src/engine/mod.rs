//! Hierarchical config comparison.
//!
//! Lines are identified by their full ancestor chain, aligned on those keys,
//! and then labelled against an order-independent structural diff so moved
//! blocks show up as reorders instead of delete/insert pairs.
//!
//! # Example
//! ```ignore
//! use config_lens::engine::{compare, CompareOptions, Platform};
//!
//! let options = CompareOptions::for_platform(Platform::CiscoIos);
//! let result = compare(&running, &candidate, &options)?;
//! for row in result.highlighted_rows() {
//!     println!("{:?}", result.rows.row(row));
//! }
//! ```

mod align;
mod cancel;
mod classify;
mod compare;
mod ignore;
mod inline;
mod model;
mod path;

// Public API exports
pub use align::{align, AlignOptions, AlignedRow, AlignedRows, DiffAlgorithm};
pub use cancel::Cancellation;
pub use classify::{classify, classify_degraded, RowType, Side};
pub use compare::{compare, compare_with_model, CompareOptions, CompareResult, CompareStats};
pub use ignore::{IgnorePatterns, IgnorePatternsBuilder};
pub use inline::{inline_hints, similarity_ratio, InlineHint};
pub use model::{ConfigModel, ConfigTree, IndentConfigModel, Platform, StructuralDiff};
pub use path::{index, is_path_prefix, path_keys, ConfigLine, HierarchicalPath};

// Error type
use crate::utils::error::VlanError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Comparison cancelled")]
    Cancelled,

    #[error("Comparison exceeded its deadline")]
    DeadlineExceeded,

    #[error(transparent)]
    Vlan(#[from] VlanError),
}

#[cfg(test)]
mod tests;
