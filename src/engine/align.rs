//! Two-pass, hierarchy-aware line alignment.
//!
//! Produces four parallel arrays (lines and keys per side) of identical
//! length, padded with `""` wherever one side has no line. Rows are matched
//! on path keys, never on raw text.

use super::cancel::Cancellation;
use super::EngineError;
use log::debug;
use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices_deadline, Algorithm, DiffTag};
use std::ops::Range;

/// Diff algorithm used to compute the opcode list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(value: DiffAlgorithm) -> Self {
        match value {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Options for a single alignment run
#[derive(Debug, Clone, Default)]
pub struct AlignOptions {
    pub algorithm: DiffAlgorithm,
    pub cancel: Cancellation,
}

/// Parallel row arrays produced by [`align`]
///
/// All four vectors always have the same length. A key is `""` exactly
/// when the line on that side is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRows {
    pub source_lines: Vec<String>,
    pub target_lines: Vec<String>,
    pub source_keys: Vec<String>,
    pub target_keys: Vec<String>,
}

/// Borrowed view of one aligned row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedRow<'a> {
    pub source_line: &'a str,
    pub target_line: &'a str,
    pub source_key: &'a str,
    pub target_key: &'a str,
}

impl AlignedRows {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            source_lines: Vec::with_capacity(capacity),
            target_lines: Vec::with_capacity(capacity),
            source_keys: Vec::with_capacity(capacity),
            target_keys: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.source_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_lines.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<AlignedRow<'_>> {
        if index >= self.len() {
            return None;
        }
        Some(AlignedRow {
            source_line: &self.source_lines[index],
            target_line: &self.target_lines[index],
            source_key: &self.source_keys[index],
            target_key: &self.target_keys[index],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = AlignedRow<'_>> + '_ {
        (0..self.len()).filter_map(move |index| self.row(index))
    }

    fn push_pair(&mut self, source: (&str, &str), target: (&str, &str)) {
        self.source_lines.push(source.0.to_string());
        self.source_keys.push(source.1.to_string());
        self.target_lines.push(target.0.to_string());
        self.target_keys.push(target.1.to_string());
    }

    fn push_source_only(&mut self, line: &str, key: &str) {
        self.push_pair((line, key), ("", ""));
    }

    fn push_target_only(&mut self, line: &str, key: &str) {
        self.push_pair(("", ""), (line, key));
    }
}

/// Align two line sequences on their path keys
///
/// **Public** - main entry point of the aligner
///
/// # Arguments
/// * `source_lines` / `target_lines` - Raw lines to display
/// * `source_keys` / `target_keys` - Path keys, one per line
/// * `options` - Diff algorithm and cancellation
///
/// # Algorithm
/// 1. Diff the key sequences into equal/delete/insert/replace opcodes
/// 2. Copy equal rows, pad delete/insert rows on the missing side
/// 3. Re-diff every replace block on its own keys: matches inside the block
///    become ordinary rows, everything else lands on separate padded rows
///
/// # Errors
/// * `EngineError::Cancelled` / `EngineError::DeadlineExceeded` when the
///   cancellation check trips between opcode blocks
pub fn align<S: AsRef<str>>(
    source_lines: &[S],
    target_lines: &[S],
    source_keys: &[String],
    target_keys: &[String],
    options: &AlignOptions,
) -> Result<AlignedRows, EngineError> {
    debug_assert_eq!(source_lines.len(), source_keys.len());
    debug_assert_eq!(target_lines.len(), target_keys.len());

    let ops = capture_diff_slices_deadline(
        options.algorithm.into(),
        source_keys,
        target_keys,
        options.cancel.deadline(),
    );

    let mut rows = AlignedRows::with_capacity(source_lines.len().max(target_lines.len()));
    let mut replace_blocks = 0usize;

    for op in &ops {
        options.cancel.check()?;

        let (tag, old, new) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {
                for (i, j) in old.zip(new) {
                    rows.push_pair(
                        (source_lines[i].as_ref(), &source_keys[i]),
                        (target_lines[j].as_ref(), &target_keys[j]),
                    );
                }
            }
            DiffTag::Delete => {
                for i in old {
                    rows.push_source_only(source_lines[i].as_ref(), &source_keys[i]);
                }
            }
            DiffTag::Insert => {
                for j in new {
                    rows.push_target_only(target_lines[j].as_ref(), &target_keys[j]);
                }
            }
            DiffTag::Replace => {
                replace_blocks += 1;
                align_replace_block(
                    &mut rows,
                    (source_lines, source_keys, old),
                    (target_lines, target_keys, new),
                    options,
                )?;
            }
        }
    }

    debug!(
        "Aligned {} source / {} target lines into {} rows ({} opcodes, {} replace blocks)",
        source_lines.len(),
        target_lines.len(),
        rows.len(),
        ops.len(),
        replace_blocks
    );

    Ok(rows)
}

/// Re-match a replace block on its own keys
///
/// **Private** - second pass of [`align`]
///
/// Keys that still match inside the block are content that moved within
/// it; they are paired. All other lines go on their own rows so two
/// unrelated lines never share one.
fn align_replace_block<S: AsRef<str>>(
    rows: &mut AlignedRows,
    source: (&[S], &[String], Range<usize>),
    target: (&[S], &[String], Range<usize>),
    options: &AlignOptions,
) -> Result<(), EngineError> {
    options.cancel.check()?;

    let (source_lines, source_keys, old) = source;
    let (target_lines, target_keys, new) = target;

    let source_block = &source_keys[old.clone()];
    let target_block = &target_keys[new.clone()];

    let inner_ops = capture_diff_slices_deadline(
        options.algorithm.into(),
        source_block,
        target_block,
        options.cancel.deadline(),
    );

    for op in &inner_ops {
        let (tag, inner_old, inner_new) = op.as_tag_tuple();

        if tag == DiffTag::Equal {
            for (i, j) in inner_old.zip(inner_new) {
                let (si, tj) = (old.start + i, new.start + j);
                rows.push_pair(
                    (source_lines[si].as_ref(), &source_keys[si]),
                    (target_lines[tj].as_ref(), &target_keys[tj]),
                );
            }
            continue;
        }

        for i in inner_old {
            let si = old.start + i;
            rows.push_source_only(source_lines[si].as_ref(), &source_keys[si]);
        }
        for j in inner_new {
            let tj = new.start + j;
            rows.push_target_only(target_lines[tj].as_ref(), &target_keys[tj]);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::path::path_keys;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn align_text(source: &str, target: &str) -> AlignedRows {
        let source_lines: Vec<&str> = source.lines().collect();
        let target_lines: Vec<&str> = target.lines().collect();
        align(
            &source_lines,
            &target_lines,
            &path_keys(&source_lines),
            &path_keys(&target_lines),
            &AlignOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_identical_texts_pair_every_row() {
        let rows = align_text("a\n b\nc", "a\n b\nc");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.source_lines, rows.target_lines);
        assert_eq!(rows.source_keys, rows.target_keys);
    }

    #[test]
    fn test_insert_pads_source() {
        let rows = align_text("A\nB", "A\nC\nB");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows.source_lines, vec!["A", "", "B"]);
        assert_eq!(rows.target_lines, vec!["A", "C", "B"]);
        assert_eq!(rows.source_keys[1], "");
    }

    #[test]
    fn test_delete_pads_target() {
        let rows = align_text("A\nB\nC", "A\nC");

        assert_eq!(rows.source_lines, vec!["A", "B", "C"]);
        assert_eq!(rows.target_lines, vec!["A", "", "C"]);
        assert_eq!(rows.target_keys[1], "");
    }

    #[test]
    fn test_replace_block_never_shares_a_row() {
        let rows = align_text("a\nb", "c\nd");

        assert_eq!(rows.source_lines, vec!["a", "b", "", ""]);
        assert_eq!(rows.target_lines, vec!["", "", "c", "d"]);
    }

    #[test]
    fn test_same_text_under_new_parent_is_inserted() {
        let source = "interface Gi0/0\n no shutdown\ninterface Gi0/1\n no shutdown";
        let target =
            "interface Gi0/0\n no shutdown\ninterface Gi0/1\n no shutdown\ninterface Gi0/2\n no shutdown";
        let rows = align_text(source, target);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows.source_lines[4], "");
        assert_eq!(rows.target_lines[4], "interface Gi0/2");
        assert_eq!(rows.source_lines[5], "");
        assert_eq!(rows.target_keys[5], "interface Gi0/2 > no shutdown");
    }

    #[test]
    fn test_empty_inputs() {
        let rows = align_text("", "");
        assert!(rows.is_empty());

        let rows = align_text("", "x\ny");
        assert_eq!(rows.source_lines, vec!["", ""]);
    }

    #[test]
    fn test_cancelled_alignment_errors() {
        let flag = Arc::new(AtomicBool::new(true));
        let options = AlignOptions {
            cancel: Cancellation::none().with_flag(flag),
            ..Default::default()
        };
        let lines = ["a", "b"];
        let keys = path_keys(&lines);

        let result = align(&lines, &lines, &keys, &keys, &options);
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }

    #[test]
    fn test_row_view() {
        let rows = align_text("A", "A");
        let row = rows.row(0).unwrap();

        assert_eq!(row.source_line, "A");
        assert_eq!(row.target_key, "A");
        assert!(rows.row(1).is_none());
    }
}
