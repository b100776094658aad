//! Compare command implementation.
//! Orchestrates settings, file loading, the engine and rendering.

use super::models::{CompareArgs, OutputFormat};
use super::utils::read_config_text;
use crate::engine::{compare, AlignOptions, Cancellation, CompareOptions, Platform};
use crate::output::{
    format_html, format_text, render_compare_summary, report_to_string, write_report, write_text,
    CompareReport,
};
use crate::utils::config::{DEFAULT_COMPARE_TIMEOUT, EXIT_DIFF, EXIT_NO_DIFF};
use crate::utils::settings::{load_settings, Settings};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info};
use std::time::Duration;

/// Execute the compare command
///
/// # Returns
/// Process exit code: 0 without differences, 1 with differences
pub fn execute_compare(args: CompareArgs) -> Result<i32> {
    // Step 1: Load settings
    let settings = match &args.config {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    // Step 2: Resolve options (flags override the settings file)
    let options = resolve_options(&args, &settings)?;
    debug!(
        "Comparing with platform={}, normalize={}, {} ignore patterns",
        options.platform,
        options.normalize,
        options.ignore.len()
    );

    // Step 3: Read inputs
    let source = read_config_text(&args.source).context("Failed to read source config")?;
    let target = read_config_text(&args.target).context("Failed to read target config")?;

    // Step 4: Compare
    let result = compare(&source, &target, &options).context("Comparison failed")?;

    // Step 5: Render and write
    let src_name = args.source.display().to_string();
    let tgt_name = args.target.display().to_string();
    let report = || CompareReport::new(&result, &src_name, &tgt_name, options.platform);

    match (&args.output_file, args.format) {
        (Some(path), OutputFormat::Json) => {
            write_report(&report(), path).context("Failed to write JSON report")?;
            eprintln!("Output written to {}", path.display().to_string().cyan());
        }
        (output_file, format) => {
            let rendered = match format {
                OutputFormat::Text => format_text(&result),
                OutputFormat::Json => report_to_string(&report())?,
                OutputFormat::Html => format_html(&result, &src_name, &tgt_name, settings.inline.threshold),
            };
            match output_file {
                Some(path) => {
                    write_text(&rendered, path).context("Failed to write output file")?;
                    eprintln!("Output written to {}", path.display().to_string().cyan());
                }
                None => print!("{}", rendered),
            }
        }
    }

    // Step 6: Terminal summary
    if args.print_summary {
        eprintln!("{}", render_compare_summary(&result, &src_name, &tgt_name));
    }

    let has_diff = result.has_diff();
    info!("Comparison finished, differences found: {}", has_diff);
    Ok(if has_diff { EXIT_DIFF } else { EXIT_NO_DIFF })
}

/// Merge CLI flags with settings file values
///
/// **Private** - internal helper
fn resolve_options(args: &CompareArgs, settings: &Settings) -> Result<CompareOptions> {
    let platform = match args.platform {
        Some(platform) => platform,
        None => settings.platform()?.unwrap_or(Platform::CiscoIos),
    };

    let normalize = !args.no_normalize && settings.normalize.unwrap_or(true);

    let ignore = settings
        .ignore_patterns(&args.ignore)
        .context("Invalid ignore pattern")?;

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .or_else(|| settings.timeout())
        .unwrap_or(DEFAULT_COMPARE_TIMEOUT);

    Ok(CompareOptions {
        platform,
        normalize,
        ignore,
        align: AlignOptions {
            algorithm: settings.algorithm,
            cancel: Cancellation::none().with_timeout(timeout),
        },
    })
}
