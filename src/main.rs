//! Config Lens CLI
//!
//! Hierarchy-aware diff and change validation for network device
//! configurations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use env_logger::Env;
use std::path::PathBuf;

use config_lens::commands::{
    display_platforms, display_version, execute_compare, execute_folder, execute_validate,
    CompareArgs, FolderArgs, OutputFormat, ValidateArgs,
};
use config_lens::engine::Platform;
use config_lens::utils::config::{EXIT_ERROR, EXIT_NO_DIFF};

/// Config Lens - compare and validate network device configurations
#[derive(Parser, Debug)]
#[command(name = "config-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two config files
    Compare {
        /// Source (left) config file
        source: PathBuf,

        /// Target (right) config file
        target: PathBuf,

        /// Platform name, e.g. CISCO_IOS
        #[arg(short, long)]
        platform: Option<Platform>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Regex of lines to ignore (repeatable)
        #[arg(long = "ignore", value_name = "REGEX")]
        ignore: Vec<String>,

        /// Do not normalize VLAN trunk lines
        #[arg(long)]
        no_normalize: bool,

        /// TOML settings file
        #[arg(short, long, env = "CONFIG_LENS_SETTINGS")]
        config: Option<PathBuf>,

        /// Abort the comparison after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print a colored summary to stderr
        #[arg(long)]
        summary: bool,
    },

    /// Check that a change list explains every difference
    Validate {
        /// Current running config
        running: PathBuf,

        /// Change commands
        change: PathBuf,

        /// Config expected after the change
        expected: PathBuf,

        /// Platform name, e.g. CISCO_IOS
        #[arg(short, long, default_value = "CISCO_IOS")]
        platform: Platform,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,

        /// Normalize VLAN trunk lines first
        #[arg(long)]
        normalize: bool,

        /// Abort after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Compare two folders file by file
    Folder {
        /// Left folder
        left: PathBuf,

        /// Right folder
        right: PathBuf,

        /// Descend into subfolders
        #[arg(short, long)]
        recursive: bool,
    },

    /// List platforms and their structural diff support
    Platforms,

    /// Display version information
    Version,
}

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    let code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    };

    std::process::exit(code);
}

/// Dispatch a parsed command and return its exit code
///
/// **Private** - internal command dispatch
fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Compare {
            source,
            target,
            platform,
            format,
            output_file,
            ignore,
            no_normalize,
            config,
            timeout_ms,
            summary,
        } => execute_compare(CompareArgs {
            source,
            target,
            platform,
            format,
            output_file,
            ignore,
            no_normalize,
            config,
            timeout_ms,
            print_summary: summary,
        }),

        Commands::Validate {
            running,
            change,
            expected,
            platform,
            format,
            output_file,
            normalize,
            timeout_ms,
        } => execute_validate(ValidateArgs {
            running,
            change,
            expected,
            platform,
            format,
            output_file,
            normalize,
            timeout_ms,
        }),

        Commands::Folder {
            left,
            right,
            recursive,
        } => execute_folder(FolderArgs {
            left,
            right,
            recursive,
        }),

        Commands::Platforms => {
            display_platforms();
            Ok(EXIT_NO_DIFF)
        }

        Commands::Version => {
            display_version();
            Ok(EXIT_NO_DIFF)
        }
    }
}
