use crate::engine::Platform;
use clap::ValueEnum;
use std::path::PathBuf;

/// Output format of the compare and validate commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Arguments for the compare command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CompareArgs {
    /// Source (left) config file
    pub source: PathBuf,

    /// Target (right) config file
    pub target: PathBuf,

    /// Platform override; falls back to the settings file, then CISCO_IOS
    pub platform: Option<Platform>,

    pub format: OutputFormat,

    /// Write output here instead of stdout
    pub output_file: Option<PathBuf>,

    /// Extra ignore patterns, appended after the settings file's
    pub ignore: Vec<String>,

    /// Skip VLAN trunk normalization
    pub no_normalize: bool,

    /// Optional TOML settings file
    pub config: Option<PathBuf>,

    pub timeout_ms: Option<u64>,

    /// Print a colored summary to stderr
    pub print_summary: bool,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            platform: None,
            format: OutputFormat::Text,
            output_file: None,
            ignore: Vec::new(),
            no_normalize: false,
            config: None,
            timeout_ms: None,
            print_summary: false,
        }
    }
}

/// Arguments for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    pub running: PathBuf,
    pub change: PathBuf,
    pub expected: PathBuf,
    pub platform: Platform,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,

    /// Normalize VLAN trunk lines before validating
    pub normalize: bool,

    pub timeout_ms: Option<u64>,
}

/// Arguments for the folder command
#[derive(Debug, Clone, Default)]
pub struct FolderArgs {
    pub left: PathBuf,
    pub right: PathBuf,

    /// Descend into subdirectories
    pub recursive: bool,
}
