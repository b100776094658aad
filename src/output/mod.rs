//! Renderers and report writers for comparison results.
//!
//! Every format is a lossless projection of the engine's row arrays:
//! - Text listings and colored terminal summaries
//! - JSON reports (compare and validate)
//! - Standalone HTML tables

pub mod html;
pub mod json;
pub mod text;

// Re-export main functions
pub use html::format_html;
pub use json::{
    read_compare_report, report_to_string, write_report, write_text, CompareReport, ReportChangeLine,
    ReportRow, ValidateReport,
};
pub use text::{format_text, format_validate_text, render_compare_summary, render_validate_status};
