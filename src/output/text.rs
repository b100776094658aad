//! Plain-text and terminal rendering.

use crate::engine::{CompareResult, RowType};
use crate::validate::{ChangeType, ValidateResult};
use colored::*;

/// Unified-style listing of differing rows
///
/// `- <source>` for deleted/reordered source lines, `+ <target>` for
/// inserted/reordered target lines.
pub fn format_text(result: &CompareResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (i, row) in result.rows.iter().enumerate() {
        if matches!(result.source_types[i], RowType::Delete | RowType::Reorder) && !row.source_line.is_empty() {
            lines.push(format!("- {}", row.source_line));
        }
        if matches!(result.target_types[i], RowType::Insert | RowType::Reorder) && !row.target_line.is_empty() {
            lines.push(format!("+ {}", row.target_line));
        }
    }

    if lines.is_empty() {
        return "(no differences)\n".to_string();
    }
    lines.join("\n") + "\n"
}

/// Human-readable summary of a comparison for the terminal
pub fn render_compare_summary(result: &CompareResult, src_file: &str, tgt_file: &str) -> String {
    let stats = result.stats();
    let mut out = String::new();

    out.push_str(&"\nConfig Comparison Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Source: {}\n", src_file));
    out.push_str(&format!("Target: {}\n", tgt_file));
    out.push_str("---------------------------------------------------\n");
    out.push_str(&format!("Rows:      {}\n", stats.rows));
    out.push_str(&format!("Deleted:   {}\n", stats.deleted.to_string().red()));
    out.push_str(&format!("Inserted:  {}\n", stats.inserted.to_string().green()));
    out.push_str(&format!("Reordered: {}\n", stats.reordered.to_string().yellow()));
    out.push_str(&format!("Ignored:   {}\n", stats.ignored));

    if !result.structural {
        out.push_str(&"Structural diff unavailable for this platform; reorders are not detected\n".dimmed().to_string());
    }

    out.push_str("---------------------------------------------------\n");
    let status = if result.has_diff() {
        "STATUS: DIFFERENCES FOUND".yellow().bold()
    } else {
        "STATUS: IDENTICAL".green().bold()
    };
    out.push_str(&status.to_string());
    out.push('\n');
    out
}

fn row_marker(row_type: RowType) -> Option<&'static str> {
    match row_type {
        RowType::ChangeRemove => Some("-"),
        RowType::Remove => Some("-!"),
        RowType::ChangeAdd => Some("+"),
        RowType::Add => Some("+!"),
        RowType::Reorder => Some("~"),
        _ => None,
    }
}

/// Listing of a validation: differing rows, then change-line verdicts
///
/// Rows no change explains are marked `-!`/`+!`; reordered rows `~`.
pub fn format_validate_text(result: &ValidateResult) -> String {
    let mut out = String::new();

    for (i, row) in result.rows.iter().enumerate() {
        let row_no = i + 1;
        if let Some(marker) = row_marker(result.running_types[i]) {
            out.push_str(&format!("{:>5} {:<2} {}\n", row_no, marker, row.source_line));
        }
        if let Some(marker) = row_marker(result.expected_types[i]) {
            out.push_str(&format!("{:>5} {:<2} {}\n", row_no, marker, row.target_line));
        }
    }

    let unmatched = result.unmatched_lines();
    if !unmatched.is_empty() {
        out.push_str("\nUnapplied change commands:\n");
        for line in unmatched {
            out.push_str(&format!("{:>5}    {}\n", line + 1, result.change_lines[line]));
        }
    }

    out.push('\n');
    out.push_str(&validate_status(result));
    out.push('\n');
    out
}

fn validate_status(result: &ValidateResult) -> String {
    let explained = result
        .change_types
        .iter()
        .filter(|t| **t == ChangeType::Change)
        .count();

    if result.is_clean() {
        format!("VALID: every difference is explained ({} change lines matched)", explained)
    } else if !result.is_valid {
        format!(
            "INVALID: {} rows are not explained by the change",
            result.unexplained_rows().len()
        )
    } else {
        format!(
            "INCOMPLETE: {} change lines do not appear in the difference",
            result.unmatched_lines().len()
        )
    }
}

/// Colored one-line verdict of a validation for the terminal
pub fn render_validate_status(result: &ValidateResult) -> String {
    let status = validate_status(result);
    if result.is_clean() {
        status.green().bold().to_string()
    } else if !result.is_valid {
        status.red().bold().to_string()
    } else {
        status.yellow().bold().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compare, CompareOptions};
    use crate::validate::{validate, ValidateOptions};

    #[test]
    fn test_format_text_insert() {
        let result = compare("A\nB", "A\nC\nB", &CompareOptions::default()).unwrap();
        assert_eq!(format_text(&result), "+ C\n");
    }

    #[test]
    fn test_format_text_no_differences() {
        let result = compare("A", "A", &CompareOptions::default()).unwrap();
        assert_eq!(format_text(&result), "(no differences)\n");
    }

    #[test]
    fn test_summary_mentions_files() {
        colored::control::set_override(false);
        let result = compare("A", "B", &CompareOptions::default()).unwrap();
        let summary = render_compare_summary(&result, "left.cfg", "right.cfg");

        assert!(summary.contains("Source: left.cfg"));
        assert!(summary.contains("DIFFERENCES FOUND"));
    }

    #[test]
    fn test_validate_text_lists_unapplied() {
        let result = validate("hostname a", "ntp server 1.1.1.1", "hostname a", &ValidateOptions::default()).unwrap();
        let text = format_validate_text(&result);

        assert!(text.contains("Unapplied change commands:"));
        assert!(text.contains("ntp server 1.1.1.1"));
        assert!(text.contains("INCOMPLETE"));
    }
}
