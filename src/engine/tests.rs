//! Integration tests for the engine module.
//!
//! Tests the complete normalize -> align -> classify -> ignore workflow.

use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const RUNNING: &str = "\
hostname core-1
interface GigabitEthernet0/1
 description Uplink
 no shutdown
interface GigabitEthernet0/2
 description Server
 shutdown";

fn ios() -> CompareOptions {
    CompareOptions::for_platform(Platform::CiscoIos)
}

fn reorder_keys(result: &CompareResult, side: Side) -> HashSet<String> {
    let keys = match side {
        Side::Source => &result.rows.source_keys,
        Side::Target => &result.rows.target_keys,
    };
    keys.iter()
        .zip(result.types(side))
        .filter(|(_, t)| **t == RowType::Reorder)
        .map(|(k, _)| k.clone())
        .collect()
}

#[test]
fn test_identical_inputs_are_all_equal() {
    let result = compare(RUNNING, RUNNING, &ios()).unwrap();

    assert_eq!(result.rows.len(), 7);
    assert!(result.source_types.iter().all(|t| *t == RowType::Equal));
    assert!(result.target_types.iter().all(|t| *t == RowType::Equal));
    assert!(!result.has_diff());
    assert!(result.structural);
}

#[test]
fn test_single_insert() {
    let result = compare("A\nB", "A\nC\nB", &ios()).unwrap();

    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.rows.source_lines[1], "");
    assert_eq!(result.rows.target_lines[1], "C");
    assert_eq!(result.source_types[1], RowType::Empty);
    assert_eq!(result.target_types[1], RowType::Insert);
    assert_eq!(result.highlighted_rows(), vec![1]);
}

#[test]
fn test_swapped_blocks_are_reorders() {
    let source = "interface A\n x\ninterface B\n y";
    let target = "interface B\n y\ninterface A\n x";
    let result = compare(source, target, &ios()).unwrap();

    let types: Vec<RowType> = result
        .source_types
        .iter()
        .chain(&result.target_types)
        .copied()
        .collect();
    assert!(!types.contains(&RowType::Delete));
    assert!(!types.contains(&RowType::Insert));

    let src = reorder_keys(&result, Side::Source);
    assert!(!src.is_empty());
    assert_eq!(src, reorder_keys(&result, Side::Target));

    let stats = result.stats();
    assert_eq!(stats.deleted + stats.inserted, 0);
    assert_eq!(stats.reordered, src.len());
}

#[test]
fn test_counterpart_row_navigation() {
    let source = "interface A\n x\ninterface B\n y";
    let target = "interface B\n y\ninterface A\n x";
    let result = compare(source, target, &ios()).unwrap();

    let row = result
        .source_types
        .iter()
        .position(|t| *t == RowType::Reorder)
        .unwrap();
    let other = result.counterpart_row(Side::Source, row).unwrap();

    assert_eq!(result.rows.target_keys[other], result.rows.source_keys[row]);
    assert_eq!(result.counterpart_row(Side::Target, other), Some(row));
    assert_eq!(result.counterpart_row(Side::Source, usize::MAX), None);
}

#[test]
fn test_degraded_platform_never_reorders() {
    let source = "interface A\n x\ninterface B\n y";
    let target = "interface B\n y\ninterface A\n x";
    let result = compare(source, target, &CompareOptions::for_platform(Platform::JuniperJunos)).unwrap();

    assert!(!result.structural);
    assert!(!result.source_types.contains(&RowType::Reorder));
    assert!(!result.target_types.contains(&RowType::Reorder));
    assert!(result.source_types.contains(&RowType::Delete));
    assert!(result.target_types.contains(&RowType::Insert));
}

#[test]
fn test_same_text_under_other_parent_is_not_equal() {
    let source = "interface Gi0/1\n shutdown\ninterface Gi0/2";
    let target = "interface Gi0/1\ninterface Gi0/2\n shutdown";
    let result = compare(source, target, &ios()).unwrap();

    let deleted: Vec<&str> = result
        .rows
        .iter()
        .zip(&result.source_types)
        .filter(|(_, t)| **t == RowType::Delete)
        .map(|(row, _)| row.source_key)
        .collect();
    let inserted: Vec<&str> = result
        .rows
        .iter()
        .zip(&result.target_types)
        .filter(|(_, t)| **t == RowType::Insert)
        .map(|(row, _)| row.target_key)
        .collect();

    assert_eq!(deleted, vec!["interface Gi0/1 > shutdown"]);
    assert_eq!(inserted, vec!["interface Gi0/2 > shutdown"]);
}

#[test]
fn test_ignore_patterns_apply_to_both_sides() {
    let mut options = ios();
    options.ignore = IgnorePatterns::from_patterns(["^ntp clock-period"]).unwrap();

    let result = compare(
        "hostname r1\nntp clock-period 17179",
        "hostname r1\nntp clock-period 17180",
        &options,
    )
    .unwrap();

    assert!(!result.has_diff());
    assert_eq!(result.stats().ignored, 2);
}

#[test]
fn test_vlan_split_is_normalized_before_compare() {
    let source = "interface Gi1/0/1\n switchport trunk allowed vlan 10,20\n switchport trunk allowed vlan add 30";
    let target = "interface Gi1/0/1\n switchport trunk allowed vlan 10,20,30";

    let mut options = ios();
    options.normalize = true;
    assert!(!compare(source, target, &options).unwrap().has_diff());

    options.normalize = false;
    assert!(compare(source, target, &options).unwrap().has_diff());
}

#[test]
fn test_vlan_annotation_rows_are_not_highlighted() {
    let source = "interface Gi1/0/1\n switchport trunk allowed vlan 10,20";
    let target = "interface Gi1/0/1\n switchport trunk allowed vlan 10,30";

    let mut options = ios();
    options.normalize = true;
    let result = compare(source, target, &options).unwrap();

    let annotation_row = result
        .rows
        .source_lines
        .iter()
        .position(|l| l.contains("! [vlan diff]"))
        .unwrap();
    assert_eq!(
        result.rows.source_lines[annotation_row],
        " ! [vlan diff]  -delete:20  +add:30"
    );
    assert_eq!(result.source_types[annotation_row], RowType::Equal);
    assert!(!result.highlighted_rows().contains(&annotation_row));
    assert!(!result.highlighted_rows().is_empty());
}

#[test]
fn test_malformed_vlan_is_an_error() {
    let mut options = ios();
    options.normalize = true;

    let err = compare("interface Gi0/1\n switchport trunk allowed vlan 9-2", "", &options).unwrap_err();
    assert!(matches!(err, EngineError::Vlan(_)));
}

#[test]
fn test_cancelled_compare() {
    let mut options = ios();
    options.align.cancel = Cancellation::none().with_flag(Arc::new(AtomicBool::new(true)));

    assert_eq!(compare("a", "b", &options).unwrap_err(), EngineError::Cancelled);
}

#[test]
fn test_custom_model_enables_structure() {
    let source = "set a\nset b";
    let target = "set b\nset a";
    let model = IndentConfigModel::with_platforms([Platform::Vyos]);

    let result = compare_with_model(source, target, &CompareOptions::for_platform(Platform::Vyos), &model).unwrap();

    assert!(result.structural);
    assert!(result.source_types.contains(&RowType::Reorder));
}

#[test]
fn test_inline_hints_for_changed_line() {
    let result = compare("hostname core-1", "hostname core-2", &ios()).unwrap();
    let hints = inline_hints(&result, 0.4);

    assert_eq!(hints.len(), 1);
    assert!(hints[0].ratio > 0.9);
}
