//! Folder command implementation.
//! Pairs files of two directories by relative name and reports which differ.

use super::models::FolderArgs;
use crate::utils::config::{EXIT_DIFF, EXIT_NO_DIFF};
use crate::utils::error::FolderError;
use anyhow::Result;
use colored::*;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-file comparison status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Same,
    Diff,
    OnlyLeft,
    OnlyRight,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Same => "same",
            FileStatus::Diff => "diff",
            FileStatus::OnlyLeft => "only_left",
            FileStatus::OnlyRight => "only_right",
        }
    }
}

/// One file of a folder comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiffEntry {
    /// Path relative to the scanned root, `/`-separated
    pub name: String,
    pub status: FileStatus,
    pub left: Option<PathBuf>,
    pub right: Option<PathBuf>,
}

/// Scanner pairing the files of two directories
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderDiffScanner {
    recursive: bool,
}

impl FolderDiffScanner {
    pub fn new(recursive: bool) -> Self {
        Self { recursive }
    }

    /// Compare two directories
    ///
    /// # Returns
    /// One entry per relative file name, sorted by name
    ///
    /// # Errors
    /// * `FolderError::NotADirectory` - either side is not a directory
    /// * `FolderError::IoError` - a file could not be read
    pub fn scan(&self, left: &Path, right: &Path) -> Result<Vec<FileDiffEntry>, FolderError> {
        for dir in [left, right] {
            if !dir.is_dir() {
                return Err(FolderError::NotADirectory(dir.display().to_string()));
            }
        }

        let left_files = self.collect_files(left)?;
        let right_files = self.collect_files(right)?;
        let names: BTreeSet<&String> = left_files.keys().chain(right_files.keys()).collect();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let lp = left_files.get(name);
            let rp = right_files.get(name);
            let status = match (lp, rp) {
                (Some(l), Some(r)) => {
                    if same_content(l, r)? {
                        FileStatus::Same
                    } else {
                        FileStatus::Diff
                    }
                }
                (Some(_), None) => FileStatus::OnlyLeft,
                (None, _) => FileStatus::OnlyRight,
            };
            entries.push(FileDiffEntry {
                name: name.clone(),
                status,
                left: lp.cloned(),
                right: rp.cloned(),
            });
        }

        debug!(
            "Scanned {} and {}: {} entries",
            left.display(),
            right.display(),
            entries.len()
        );
        Ok(entries)
    }

    fn collect_files(&self, root: &Path) -> Result<BTreeMap<String, PathBuf>, FolderError> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = BTreeMap::new();

        for entry in WalkDir::new(root).min_depth(1).max_depth(max_depth) {
            let entry = entry.map_err(|e| FolderError::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(name, entry.path().to_path_buf());
        }

        Ok(files)
    }
}

/// Compare as text with line endings unified, falling back to bytes
fn same_content(left: &Path, right: &Path) -> Result<bool, FolderError> {
    let left_bytes = fs::read(left)?;
    let right_bytes = fs::read(right)?;

    match (std::str::from_utf8(&left_bytes), std::str::from_utf8(&right_bytes)) {
        (Ok(l), Ok(r)) => Ok(l.replace("\r\n", "\n") == r.replace("\r\n", "\n")),
        _ => Ok(left_bytes == right_bytes),
    }
}

/// Execute the folder command
///
/// # Returns
/// Process exit code: 1 when any entry is not `same`
pub fn execute_folder(args: FolderArgs) -> Result<i32> {
    let entries = FolderDiffScanner::new(args.recursive).scan(&args.left, &args.right)?;

    for entry in &entries {
        let status = match entry.status {
            FileStatus::Same => entry.status.as_str().normal(),
            FileStatus::Diff => entry.status.as_str().yellow(),
            FileStatus::OnlyLeft => entry.status.as_str().red(),
            FileStatus::OnlyRight => entry.status.as_str().green(),
        };
        println!("{:<10} {}", status, entry.name);
    }

    let differing = entries.iter().filter(|e| e.status != FileStatus::Same).count();
    eprintln!("{} files compared, {} differ", entries.len(), differing);

    Ok(if differing > 0 { EXIT_DIFF } else { EXIT_NO_DIFF })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scan_statuses() {
        let left = tempdir().unwrap();
        let right = tempdir().unwrap();
        fs::write(left.path().join("a.cfg"), "hostname a\n").unwrap();
        fs::write(right.path().join("a.cfg"), "hostname a\r\n").unwrap();
        fs::write(left.path().join("b.cfg"), "x").unwrap();
        fs::write(right.path().join("b.cfg"), "y").unwrap();
        fs::write(left.path().join("c.cfg"), "x").unwrap();
        fs::write(right.path().join("d.cfg"), "x").unwrap();

        let entries = FolderDiffScanner::new(false).scan(left.path(), right.path()).unwrap();
        let summary: Vec<(&str, FileStatus)> = entries.iter().map(|e| (e.name.as_str(), e.status)).collect();

        assert_eq!(
            summary,
            vec![
                ("a.cfg", FileStatus::Same),
                ("b.cfg", FileStatus::Diff),
                ("c.cfg", FileStatus::OnlyLeft),
                ("d.cfg", FileStatus::OnlyRight),
            ]
        );
    }

    #[test]
    fn test_recursive_flag() {
        let left = tempdir().unwrap();
        let right = tempdir().unwrap();
        fs::create_dir(left.path().join("site1")).unwrap();
        fs::write(left.path().join("site1/r1.cfg"), "x").unwrap();

        let flat = FolderDiffScanner::new(false).scan(left.path(), right.path()).unwrap();
        assert!(flat.is_empty());

        let deep = FolderDiffScanner::new(true).scan(left.path(), right.path()).unwrap();
        assert_eq!(deep[0].name, "site1/r1.cfg");
        assert_eq!(deep[0].status, FileStatus::OnlyLeft);
    }

    #[test]
    fn test_binary_fallback() {
        let left = tempdir().unwrap();
        let right = tempdir().unwrap();
        fs::write(left.path().join("blob"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(right.path().join("blob"), [0xff, 0xfe, 0x00]).unwrap();

        let entries = FolderDiffScanner::new(false).scan(left.path(), right.path()).unwrap();
        assert_eq!(entries[0].status, FileStatus::Same);
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let err = FolderDiffScanner::new(false).scan(&file, dir.path()).unwrap_err();
        assert!(matches!(err, FolderError::NotADirectory(_)));
    }
}
