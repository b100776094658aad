//! Row classification.
//!
//! Alignment alone cannot tell a removed line from one that merely moved.
//! The classifier combines each row's alignment position with the
//! structural diff to make that call.

use super::align::AlignedRows;
use super::model::StructuralDiff;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Classification of one side of an aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowType {
    Equal,
    Delete,
    Insert,
    Reorder,
    Empty,
    Ignore,

    /// Deleted line explained by a change command
    ChangeRemove,

    /// Deleted line no change command explains
    Remove,

    /// Inserted line explained by a change command
    ChangeAdd,

    /// Inserted line no change command explains
    Add,
}

impl RowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowType::Equal => "equal",
            RowType::Delete => "delete",
            RowType::Insert => "insert",
            RowType::Reorder => "reorder",
            RowType::Empty => "empty",
            RowType::Ignore => "ignore",
            RowType::ChangeRemove => "change_remove",
            RowType::Remove => "remove",
            RowType::ChangeAdd => "change_add",
            RowType::Add => "add",
        }
    }

    /// Whether this type marks a difference worth showing
    pub fn is_diff(&self) -> bool {
        !matches!(self, RowType::Equal | RowType::Empty | RowType::Ignore)
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of an aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

/// Label every row using alignment position and structural membership
///
/// **Public** - used by the compare pipeline and the change validator
///
/// # Arguments
/// * `rows` - Output of the aligner
/// * `source_key_set` / `target_key_set` - Every path key of each full text
/// * `structural` - Structural diff, or `None` when the platform has no parser
///
/// # Returns
/// `(source_types, target_types)`, both `rows.len()` long
pub fn classify(
    rows: &AlignedRows,
    source_key_set: &HashSet<String>,
    target_key_set: &HashSet<String>,
    structural: Option<&StructuralDiff>,
) -> (Vec<RowType>, Vec<RowType>) {
    let Some(diff) = structural else {
        return classify_degraded(rows);
    };

    let source_types = rows
        .source_keys
        .iter()
        .zip(&rows.target_keys)
        .map(|(key, counterpart)| {
            classify_key(key, counterpart, &diff.deleted, target_key_set, RowType::Delete)
        })
        .collect();

    let target_types = rows
        .target_keys
        .iter()
        .zip(&rows.source_keys)
        .map(|(key, counterpart)| {
            classify_key(key, counterpart, &diff.added, source_key_set, RowType::Insert)
        })
        .collect();

    (source_types, target_types)
}

fn classify_key(
    key: &str,
    counterpart: &str,
    only_here: &HashSet<String>,
    other_keys: &HashSet<String>,
    missing: RowType,
) -> RowType {
    if key.is_empty() {
        RowType::Empty
    } else if only_here.contains(key) {
        missing
    } else if key != counterpart && other_keys.contains(key) {
        RowType::Reorder
    } else {
        RowType::Equal
    }
}

/// Alignment-only classification for platforms without a structural parse
///
/// A line with nothing opposite it is a delete (or insert); no reorder is
/// ever reported.
pub fn classify_degraded(rows: &AlignedRows) -> (Vec<RowType>, Vec<RowType>) {
    let one_side = |keys: &[String], counterparts: &[String], missing: RowType| -> Vec<RowType> {
        keys.iter()
            .zip(counterparts)
            .map(|(key, counterpart)| {
                if key.is_empty() {
                    RowType::Empty
                } else if counterpart.is_empty() {
                    missing
                } else {
                    RowType::Equal
                }
            })
            .collect()
    };

    (
        one_side(&rows.source_keys, &rows.target_keys, RowType::Delete),
        one_side(&rows.target_keys, &rows.source_keys, RowType::Insert),
    )
}
