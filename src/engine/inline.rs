//! Character-level highlight hints.
//!
//! Orphan delete rows are greedily paired with the most similar orphan
//! insert row; pairs above the threshold get the differing character spans
//! on each side. Purely a rendering aid, never fed back into the result.

use super::classify::RowType;
use super::compare::CompareResult;
use serde::{Deserialize, Serialize};
use similar::{DiffTag, TextDiff};
use std::ops::Range;

/// Highlight hint for one delete/insert pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineHint {
    pub source_row: usize,
    pub target_row: usize,

    /// Character similarity in `0.0..=1.0`
    pub ratio: f32,

    /// Differing character ranges in the source line
    pub source_spans: Vec<Range<usize>>,

    /// Differing character ranges in the target line
    pub target_spans: Vec<Range<usize>>,
}

/// Character similarity of two lines
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Pair orphan deletes with orphan inserts and compute their spans
///
/// # Arguments
/// * `result` - A finished comparison
/// * `threshold` - Minimum similarity ratio for a pair
pub fn inline_hints(result: &CompareResult, threshold: f32) -> Vec<InlineHint> {
    let rows = &result.rows;

    let deletes: Vec<usize> = (0..rows.len())
        .filter(|&i| result.source_types[i] == RowType::Delete && rows.target_lines[i].is_empty())
        .collect();
    let inserts: Vec<usize> = (0..rows.len())
        .filter(|&j| result.target_types[j] == RowType::Insert && rows.source_lines[j].is_empty())
        .collect();

    let mut used = vec![false; inserts.len()];
    let mut hints = Vec::new();

    for &i in &deletes {
        let source = rows.source_lines[i].as_str();

        let best = inserts
            .iter()
            .enumerate()
            .filter(|(slot, _)| !used[*slot])
            .map(|(slot, &j)| (slot, j, similarity_ratio(source, &rows.target_lines[j])))
            .fold(None::<(usize, usize, f32)>, |best, candidate| match best {
                Some(b) if b.2 >= candidate.2 => Some(b),
                _ => Some(candidate),
            });

        let Some((slot, j, ratio)) = best else {
            continue;
        };
        if ratio < threshold {
            continue;
        }

        used[slot] = true;
        let (source_spans, target_spans) = char_spans(source, &rows.target_lines[j]);
        hints.push(InlineHint {
            source_row: i,
            target_row: j,
            ratio,
            source_spans,
            target_spans,
        });
    }

    hints
}

/// Differing character ranges on each side, adjacent ranges merged
fn char_spans(a: &str, b: &str) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let diff = TextDiff::from_chars(a, b);
    let mut source_spans: Vec<Range<usize>> = Vec::new();
    let mut target_spans: Vec<Range<usize>> = Vec::new();

    for op in diff.ops() {
        let (tag, old, new) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            continue;
        }
        push_merged(&mut source_spans, old);
        push_merged(&mut target_spans, new);
    }

    (source_spans, target_spans)
}

fn push_merged(spans: &mut Vec<Range<usize>>, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => spans.push(range),
    }
}
