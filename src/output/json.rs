//! JSON report output writer.
//!
//! Builds serializable reports from engine results and writes them to
//! disk with proper formatting.

use crate::engine::{CompareResult, CompareStats, Platform, RowType};
use crate::utils::config::REPORT_VERSION;
use crate::utils::error::OutputError;
use crate::validate::{ChangeType, ValidateResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One aligned row of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// 1-based display row
    pub line: usize,
    pub src_line: String,
    pub tgt_line: String,
    pub src_type: RowType,
    pub tgt_type: RowType,
}

/// JSON report of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub version: String,
    pub src_file: String,
    pub tgt_file: String,
    pub platform: Platform,
    pub has_diff: bool,
    pub structural: bool,
    pub stats: CompareStats,

    /// ISO 8601 timestamp
    pub generated_at: String,
    pub rows: Vec<ReportRow>,
}

/// One change line of a validation report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportChangeLine {
    /// 1-based change line number
    pub line: usize,
    pub text: String,
    pub change_type: ChangeType,

    /// 1-based rows explained on the running side
    pub running_rows: Vec<usize>,

    /// 1-based rows explained on the expected side
    pub expected_rows: Vec<usize>,
}

/// JSON report of a validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateReport {
    pub version: String,
    pub running_file: String,
    pub change_file: String,
    pub expected_file: String,
    pub platform: Platform,
    pub is_valid: bool,
    pub has_unapplied_change: bool,
    pub structural: bool,
    pub generated_at: String,
    pub rows: Vec<ReportRow>,
    pub changes: Vec<ReportChangeLine>,
}

fn report_rows(
    rows: &crate::engine::AlignedRows,
    source_types: &[RowType],
    target_types: &[RowType],
) -> Vec<ReportRow> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| ReportRow {
            line: i + 1,
            src_line: row.source_line.to_string(),
            tgt_line: row.target_line.to_string(),
            src_type: source_types[i],
            tgt_type: target_types[i],
        })
        .collect()
}

fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl CompareReport {
    pub fn new(result: &CompareResult, src_file: &str, tgt_file: &str, platform: Platform) -> Self {
        Self {
            version: REPORT_VERSION.to_string(),
            src_file: src_file.to_string(),
            tgt_file: tgt_file.to_string(),
            platform,
            has_diff: result.has_diff(),
            structural: result.structural,
            stats: result.stats(),
            generated_at: generated_at(),
            rows: report_rows(&result.rows, &result.source_types, &result.target_types),
        }
    }
}

impl ValidateReport {
    pub fn new(result: &ValidateResult, files: [&str; 3], platform: Platform) -> Self {
        let [running_file, change_file, expected_file] = files;
        let one_based = |refs: &BTreeMap<usize, Vec<usize>>, line: usize| -> Vec<usize> {
            refs.get(&line)
                .map(|rows| rows.iter().map(|r| r + 1).collect())
                .unwrap_or_default()
        };

        let changes = result
            .change_lines
            .iter()
            .zip(&result.change_types)
            .enumerate()
            .map(|(i, (text, change_type))| ReportChangeLine {
                line: i + 1,
                text: text.clone(),
                change_type: *change_type,
                running_rows: one_based(&result.change_to_running, i),
                expected_rows: one_based(&result.change_to_expected, i),
            })
            .collect();

        Self {
            version: REPORT_VERSION.to_string(),
            running_file: running_file.to_string(),
            change_file: change_file.to_string(),
            expected_file: expected_file.to_string(),
            platform,
            is_valid: result.is_valid,
            has_unapplied_change: result.has_unapplied_change,
            structural: result.structural,
            generated_at: generated_at(),
            rows: report_rows(&result.rows, &result.running_types, &result.expected_types),
            changes,
        }
    }
}

/// Serialize a report to a pretty JSON string
///
/// **Public** - used for stdout output
pub fn report_to_string<T: Serialize>(report: &T) -> Result<String, OutputError> {
    let mut json = serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)?;
    json.push('\n');
    Ok(json)
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = CompareReport::new(&result, "a.cfg", "b.cfg", Platform::CiscoIos);
/// write_report(&report, "diff.json")?;
/// ```
pub fn write_report<T: Serialize>(report: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, report).map_err(OutputError::SerializationFailed)?;
    writer.write_all(b"\n").map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Report written successfully ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Write already-rendered text (text/HTML formats)
pub fn write_text(contents: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    prepare_output_path(output_path)?;
    std::fs::write(output_path, contents).map_err(OutputError::WriteFailed)?;
    debug!("Wrote {} bytes to {}", contents.len(), output_path.display());
    Ok(())
}

/// Read a comparison report back from disk
pub fn read_compare_report(input_path: impl AsRef<Path>) -> Result<CompareReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: CompareReport = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(report)
}

/// Validate the output path and create missing parent directories
///
/// **Private** - internal validation
fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
