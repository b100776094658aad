//! Change validation engine.
//!
//! Reclassifies running-vs-expected diff rows as explained or unexplained
//! by a change command list.

use super::keymap::{build_key_maps, parse_change_commands, ChangeCommand};
use super::schema::{ChangeType, ValidateResult};
use crate::engine::{
    compare_with_model, AlignOptions, CompareOptions, ConfigModel, EngineError, IndentConfigModel,
    Platform, RowType,
};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};

/// Options for one validation
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub platform: Platform,

    /// Canonicalize VLAN trunk lines first (off by default)
    pub normalize: bool,

    pub align: AlignOptions,
}

/// Validate a change list with the built-in config model
///
/// **Public** - main entry point of the validator
///
/// # Arguments
/// * `running` - Current config
/// * `change` - Ordered change commands
/// * `expected` - Config expected after applying the change
///
/// # Returns
/// A [`ValidateResult`]; unexplained rows and unapplied commands are data,
/// not errors.
///
/// # Errors
/// * `EngineError::Cancelled` / `EngineError::DeadlineExceeded`
/// * `EngineError::Vlan` - only with `normalize` enabled
pub fn validate(
    running: &str,
    change: &str,
    expected: &str,
    options: &ValidateOptions,
) -> Result<ValidateResult, EngineError> {
    validate_with_model(running, change, expected, options, &IndentConfigModel::new())
}

/// Validate a change list with a caller-supplied config model
pub fn validate_with_model(
    running: &str,
    change: &str,
    expected: &str,
    options: &ValidateOptions,
    model: &dyn ConfigModel,
) -> Result<ValidateResult, EngineError> {
    // Step 1: Diff running against expected
    let compare_options = CompareOptions {
        platform: options.platform,
        normalize: options.normalize,
        align: options.align.clone(),
        ..Default::default()
    };
    let diff = compare_with_model(running, expected, &compare_options, model)?;

    // Step 2: Key maps from the change list
    let change_lines: Vec<String> = change.lines().map(str::to_string).collect();
    let commands = parse_change_commands(&change_lines);
    let maps = build_key_maps(&commands);
    debug!(
        "Parsed {} change commands ({} add keys, {} remove keys)",
        commands.len(),
        maps.add.len(),
        maps.remove.len()
    );

    // Step 3: Reclassify delete/insert rows
    let mut change_types = vec![ChangeType::Normal; change_lines.len()];
    let mut change_to_running: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut change_to_expected: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut running_types = Vec::with_capacity(diff.rows.len());
    let mut expected_types = Vec::with_capacity(diff.rows.len());

    for (row, aligned) in diff.rows.iter().enumerate() {
        running_types.push(match diff.source_types[row] {
            RowType::Delete => match maps.remove.lookup_with_prefix(aligned.source_key) {
                Some(lines) => {
                    mark_change(lines, row, &mut change_types, &mut change_to_running);
                    RowType::ChangeRemove
                }
                None => RowType::Remove,
            },
            other => other,
        });

        expected_types.push(match diff.target_types[row] {
            RowType::Insert => match maps.add.get(aligned.target_key) {
                Some(lines) => {
                    mark_change(lines, row, &mut change_types, &mut change_to_expected);
                    RowType::ChangeAdd
                }
                None => RowType::Add,
            },
            other => other,
        });
    }

    // Step 4: Unapplied commands
    mark_unmatched(&commands, &mut change_types);

    let is_valid = !running_types.contains(&RowType::Remove) && !expected_types.contains(&RowType::Add);
    let has_unapplied_change = change_types.contains(&ChangeType::Unmatched);

    info!(
        "Validation finished: valid={}, unapplied change={}",
        is_valid, has_unapplied_change
    );

    Ok(ValidateResult {
        rows: diff.rows,
        running_types,
        expected_types,
        change_lines,
        change_types,
        change_to_running,
        change_to_expected,
        is_valid,
        has_unapplied_change,
        structural: diff.structural,
    })
}

fn mark_change(
    lines: &[usize],
    row: usize,
    change_types: &mut [ChangeType],
    back_refs: &mut BTreeMap<usize, Vec<usize>>,
) {
    for &line in lines {
        change_types[line] = ChangeType::Change;
        back_refs.entry(line).or_default().push(row);
    }
}

/// Flag commands that explained nothing
///
/// A block header whose children matched is not flagged: its key is an
/// ancestor of a matched command's path.
fn mark_unmatched(commands: &[ChangeCommand], change_types: &mut [ChangeType]) {
    let covered: HashSet<String> = commands
        .iter()
        .filter(|c| change_types[c.line] == ChangeType::Change)
        .flat_map(|c| c.path.ancestor_keys())
        .collect();

    for command in commands {
        if change_types[command.line] == ChangeType::Normal && !covered.contains(&command.key()) {
            change_types[command.line] = ChangeType::Unmatched;
        }
    }
}
