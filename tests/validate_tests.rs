use config_lens::engine::{Platform, RowType};
use config_lens::validate::{validate, ChangeType, ValidateOptions};

const RUNNING: &str = "\
hostname edge-1
interface GigabitEthernet0/1
 description uplink
 no shutdown
interface GigabitEthernet0/2
 description old-server
 shutdown
ntp server 10.0.0.1";

fn options() -> ValidateOptions {
    ValidateOptions::default()
}

#[test]
fn test_removed_interface_explained_by_negation() {
    let expected = "\
hostname edge-1
interface GigabitEthernet0/1
 description uplink
 no shutdown
ntp server 10.0.0.1";
    let change = "no interface GigabitEthernet0/2";

    let result = validate(RUNNING, change, expected, &options()).unwrap();

    let removed: Vec<RowType> = result
        .running_types
        .iter()
        .copied()
        .filter(|t| matches!(t, RowType::ChangeRemove | RowType::Remove))
        .collect();
    assert_eq!(removed, vec![RowType::ChangeRemove; 3]);
    assert!(result.is_valid);
    assert!(!result.has_unapplied_change);
    assert_eq!(result.change_types, vec![ChangeType::Change]);
    assert_eq!(result.change_to_running[&0].len(), 3);
}

#[test]
fn test_removed_interface_without_change_is_invalid() {
    let expected = "\
hostname edge-1
interface GigabitEthernet0/1
 description uplink
 no shutdown
ntp server 10.0.0.1";

    let result = validate(RUNNING, "", expected, &options()).unwrap();

    assert!(!result.is_valid);
    assert!(result.running_types.contains(&RowType::Remove));
    assert!(!result.running_types.contains(&RowType::ChangeRemove));
    assert_eq!(result.unexplained_rows().len(), 3);
}

#[test]
fn test_change_for_absent_interface_is_unmatched() {
    let change = "interface GigabitEthernet0/9\n description never-applied";

    let result = validate(RUNNING, change, RUNNING, &options()).unwrap();

    assert!(result.is_valid);
    assert!(result.has_unapplied_change);
    assert_eq!(
        result.change_types,
        vec![ChangeType::Unmatched, ChangeType::Unmatched]
    );
    assert_eq!(result.unmatched_lines(), vec![0, 1]);
}

#[test]
fn test_header_of_matched_child_is_not_unmatched() {
    let expected = RUNNING.replace(" description old-server", " description new-server");
    let change = "interface GigabitEthernet0/2\n description new-server";

    let result = validate(RUNNING, change, &expected, &options()).unwrap();

    assert_eq!(result.change_types, vec![ChangeType::Normal, ChangeType::Change]);
    assert!(!result.has_unapplied_change);
    // the old description has no explaining command
    assert!(!result.is_valid);
    assert!(result.expected_types.contains(&RowType::ChangeAdd));
    assert!(result.running_types.contains(&RowType::Remove));
}

#[test]
fn test_enable_command_explains_removed_negation() {
    let expected = RUNNING.replace(" shutdown\nntp", " no shutdown\nntp");
    let change = "interface GigabitEthernet0/2\n no shutdown";

    let result = validate(RUNNING, change, &expected, &options()).unwrap();

    assert!(result.is_valid, "running {:?} expected {:?}", result.running_types, result.expected_types);
    assert!(result.is_clean());
    assert!(result.running_types.contains(&RowType::ChangeRemove));
    assert!(result.expected_types.contains(&RowType::ChangeAdd));
    assert_eq!(result.change_to_running.get(&1).map(Vec::len), Some(1));
    assert_eq!(result.change_to_expected.get(&1).map(Vec::len), Some(1));
}

#[test]
fn test_comments_and_blank_lines_stay_normal() {
    let expected = format!("{}\nntp server 10.0.0.2", RUNNING);
    let change = "! add second ntp server\n\nntp server 10.0.0.2";

    let result = validate(RUNNING, change, &expected, &options()).unwrap();

    assert!(result.is_clean());
    assert_eq!(
        result.change_types,
        vec![ChangeType::Normal, ChangeType::Normal, ChangeType::Change]
    );
}

#[test]
fn test_degraded_platform_is_reported() {
    let options = ValidateOptions {
        platform: Platform::JuniperJunos,
        ..Default::default()
    };
    let result = validate(RUNNING, "", RUNNING, &options).unwrap();

    assert!(!result.structural);
    assert!(result.is_clean());
}
