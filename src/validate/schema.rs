//! Validation result data structures.

use crate::engine::{AlignedRows, RowType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Classification of one change line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Blank, comment, or not yet classified
    #[default]
    Normal,

    /// Explains at least one diff row
    Change,

    /// Meaningful command that explains nothing
    Unmatched,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Normal => "normal",
            ChangeType::Change => "change",
            ChangeType::Unmatched => "unmatched",
        }
    }
}

/// Outcome of validating a change list against running/expected configs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Running (source) vs expected (target) aligned rows
    pub rows: AlignedRows,

    pub running_types: Vec<RowType>,
    pub expected_types: Vec<RowType>,

    /// Raw change lines
    pub change_lines: Vec<String>,

    /// One entry per change line
    pub change_types: Vec<ChangeType>,

    /// Change line index -> 0-based rows it explains on the running side
    pub change_to_running: BTreeMap<usize, Vec<usize>>,

    /// Change line index -> 0-based rows it explains on the expected side
    pub change_to_expected: BTreeMap<usize, Vec<usize>>,

    /// No `remove`/`add` rows remain
    pub is_valid: bool,

    /// Some change line is `unmatched`
    pub has_unapplied_change: bool,

    /// Whether classification had a structural parse
    pub structural: bool,
}

impl ValidateResult {
    /// Valid and with every change command applied
    pub fn is_clean(&self) -> bool {
        self.is_valid && !self.has_unapplied_change
    }

    /// Change lines typed `unmatched`
    pub fn unmatched_lines(&self) -> Vec<usize> {
        self.change_types
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == ChangeType::Unmatched)
            .map(|(i, _)| i)
            .collect()
    }

    /// Rows no change command explains
    pub fn unexplained_rows(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&i| {
                self.running_types[i] == RowType::Remove || self.expected_types[i] == RowType::Add
            })
            .collect()
    }
}
