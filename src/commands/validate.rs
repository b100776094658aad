//! Validate command implementation.
//! Checks that a change list explains every running-vs-expected difference.

use super::models::{OutputFormat, ValidateArgs};
use super::utils::read_config_text;
use crate::engine::{AlignOptions, Cancellation};
use crate::output::{
    format_validate_text, render_validate_status, report_to_string, write_report, write_text,
    ValidateReport,
};
use crate::utils::config::{DEFAULT_COMPARE_TIMEOUT, EXIT_DIFF, EXIT_NO_DIFF};
use crate::validate::{validate, ValidateOptions};
use anyhow::{Context, Result};
use colored::*;
use std::time::Duration;

/// Execute the validate command
///
/// # Returns
/// Process exit code: 0 when valid with no unapplied change, 1 otherwise
pub fn execute_validate(args: ValidateArgs) -> Result<i32> {
    if args.format == OutputFormat::Html {
        anyhow::bail!("HTML output is only available for compare");
    }

    // Step 1: Read inputs
    let running = read_config_text(&args.running).context("Failed to read running config")?;
    let change = read_config_text(&args.change).context("Failed to read change commands")?;
    let expected = read_config_text(&args.expected).context("Failed to read expected config")?;

    // Step 2: Validate
    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_COMPARE_TIMEOUT);
    let options = ValidateOptions {
        platform: args.platform,
        normalize: args.normalize,
        align: AlignOptions {
            cancel: Cancellation::none().with_timeout(timeout),
            ..Default::default()
        },
    };
    let result = validate(&running, &change, &expected, &options).context("Validation failed")?;

    // Step 3: Render and write
    let files = [
        args.running.display().to_string(),
        args.change.display().to_string(),
        args.expected.display().to_string(),
    ];
    let report = || {
        ValidateReport::new(
            &result,
            [files[0].as_str(), files[1].as_str(), files[2].as_str()],
            args.platform,
        )
    };

    match &args.output_file {
        Some(path) => {
            if args.format == OutputFormat::Json {
                write_report(&report(), path).context("Failed to write JSON report")?;
            } else {
                write_text(&format_validate_text(&result), path).context("Failed to write output file")?;
            }
            eprintln!("Output written to {}", path.display().to_string().cyan());
            eprintln!("{}", render_validate_status(&result));
        }
        None => {
            let rendered = match args.format {
                OutputFormat::Json => report_to_string(&report())?,
                _ => format_validate_text(&result),
            };
            print!("{}", rendered);
        }
    }

    Ok(if result.is_clean() { EXIT_NO_DIFF } else { EXIT_DIFF })
}
