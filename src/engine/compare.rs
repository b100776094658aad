//! Compare pipeline.
//!
//! normalize -> index -> align -> classify -> ignore, returning a fresh
//! immutable result per call.

use super::align::{align, AlignOptions, AlignedRows};
use super::classify::{classify, RowType, Side};
use super::ignore::IgnorePatterns;
use super::model::{ConfigModel, IndentConfigModel, Platform};
use super::path::path_keys;
use super::EngineError;
use crate::utils::config::VLAN_DIFF_ANNOTATION_MARKER;
use crate::vlan::normalize_pair;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;

/// Options for one comparison
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Platform passed to the config model
    pub platform: Platform,

    /// Canonicalize VLAN trunk lines before aligning
    pub normalize: bool,

    /// Rows matching any of these are reported as `ignore`
    pub ignore: IgnorePatterns,

    /// Diff algorithm and cancellation
    pub align: AlignOptions,
}

impl CompareOptions {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Default::default()
        }
    }
}

/// Aligned and classified rows of one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    pub rows: AlignedRows,
    pub source_types: Vec<RowType>,
    pub target_types: Vec<RowType>,

    /// False when the platform had no structural parse and
    /// classification fell back to alignment only
    pub structural: bool,
}

/// Row counts by type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareStats {
    pub rows: usize,
    pub deleted: usize,
    pub inserted: usize,
    pub reordered: usize,
    pub ignored: usize,
}

impl CompareResult {
    /// Any row typed something other than equal/empty/ignore
    pub fn has_diff(&self) -> bool {
        self.source_types
            .iter()
            .chain(&self.target_types)
            .any(RowType::is_diff)
    }

    pub fn types(&self, side: Side) -> &[RowType] {
        match side {
            Side::Source => &self.source_types,
            Side::Target => &self.target_types,
        }
    }

    fn keys(&self, side: Side) -> &[String] {
        match side {
            Side::Source => &self.rows.source_keys,
            Side::Target => &self.rows.target_keys,
        }
    }

    pub fn stats(&self) -> CompareStats {
        let count = |types: &[RowType], wanted: RowType| types.iter().filter(|t| **t == wanted).count();

        CompareStats {
            rows: self.rows.len(),
            deleted: count(&self.source_types, RowType::Delete),
            inserted: count(&self.target_types, RowType::Insert),
            reordered: count(&self.source_types, RowType::Reorder),
            ignored: count(&self.source_types, RowType::Ignore),
        }
    }

    /// Row on the opposite side holding the same reordered line
    ///
    /// Returns `None` unless `row` on `side` is a `reorder`.
    pub fn counterpart_row(&self, side: Side, row: usize) -> Option<usize> {
        if self.types(side).get(row) != Some(&RowType::Reorder) {
            return None;
        }
        let key = &self.keys(side)[row];
        let other = side.opposite();

        self.keys(other)
            .iter()
            .zip(self.types(other))
            .position(|(k, t)| k == key && *t == RowType::Reorder)
    }

    /// Rows worth navigating to, excluding VLAN annotation lines
    pub fn highlighted_rows(&self) -> Vec<usize> {
        let highlighted = |t: &RowType| matches!(t, RowType::Delete | RowType::Insert | RowType::Reorder);

        self.rows
            .iter()
            .enumerate()
            .filter(|(i, row)| {
                (highlighted(&self.source_types[*i]) || highlighted(&self.target_types[*i]))
                    && !is_annotation(row.source_line)
                    && !is_annotation(row.target_line)
            })
            .map(|(i, _)| i)
            .collect()
    }
}

fn is_annotation(line: &str) -> bool {
    line.trim_start().starts_with(VLAN_DIFF_ANNOTATION_MARKER)
}

/// Compare two config texts with the built-in indentation model
///
/// **Public** - main entry point of the engine
///
/// # Errors
/// * `EngineError::Vlan` - a VLAN trunk line could not be parsed
/// * `EngineError::Cancelled` / `EngineError::DeadlineExceeded`
///
/// # Example
/// ```ignore
/// let result = compare(running, candidate, &CompareOptions::default())?;
/// assert_eq!(result.source_types.len(), result.target_types.len());
/// ```
pub fn compare(source: &str, target: &str, options: &CompareOptions) -> Result<CompareResult, EngineError> {
    compare_with_model(source, target, options, &IndentConfigModel::new())
}

/// Compare two config texts with a caller-supplied config model
pub fn compare_with_model(
    source: &str,
    target: &str,
    options: &CompareOptions,
    model: &dyn ConfigModel,
) -> Result<CompareResult, EngineError> {
    options.align.cancel.check()?;

    // Step 1: Canonicalize VLAN trunk declarations
    let (source, target): (Cow<'_, str>, Cow<'_, str>) = if options.normalize {
        let (s, t) = normalize_pair(source, target)?;
        (Cow::Owned(s), Cow::Owned(t))
    } else {
        (Cow::Borrowed(source), Cow::Borrowed(target))
    };

    // Step 2: Index
    let source_lines: Vec<&str> = source.lines().collect();
    let target_lines: Vec<&str> = target.lines().collect();
    let source_keys = path_keys(&source_lines);
    let target_keys = path_keys(&target_lines);

    // Step 3: Align
    let rows = align(&source_lines, &target_lines, &source_keys, &target_keys, &options.align)?;

    // Step 4: Classify against the structural diff
    options.align.cancel.check()?;
    let structural = model.structural_diff(options.platform, &source, &target);
    if structural.is_none() {
        info!(
            "No structural parse for {}, classifying by alignment only",
            options.platform
        );
    }

    let source_key_set: HashSet<String> = source_keys.into_iter().collect();
    let target_key_set: HashSet<String> = target_keys.into_iter().collect();
    let (mut source_types, mut target_types) =
        classify(&rows, &source_key_set, &target_key_set, structural.as_ref());

    // Step 5: Ignore pass
    options.ignore.apply(&rows, &mut source_types, &mut target_types);

    let result = CompareResult {
        rows,
        source_types,
        target_types,
        structural: structural.is_some(),
    };

    let stats = result.stats();
    debug!(
        "Compared {} rows: {} deleted, {} inserted, {} reordered, {} ignored",
        stats.rows, stats.deleted, stats.inserted, stats.reordered, stats.ignored
    );

    Ok(result)
}
