use crate::engine::{ConfigModel, IndentConfigModel, Platform};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a config file as UTF-8 text
pub fn read_config_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

/// Display the supported platforms
pub fn display_platforms() {
    let model = IndentConfigModel::new();

    println!("Supported platforms:");
    for platform in Platform::ALL {
        let structural = if model.supports(platform) {
            "structural diff"
        } else {
            "alignment only"
        };
        println!("  {:<18} {}", platform.name(), structural);
    }
}

/// Display version information
pub fn display_version() {
    println!("config-lens v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Hierarchy-aware diff and change validation for network device configurations.");
}
