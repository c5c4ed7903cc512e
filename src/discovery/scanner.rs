//! File system scanner for descriptor files.
//!
//! Recursively walks directories and keeps files whose extension the
//! config lists as a descriptor extension.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::config::PreviewConfig;

/// Scan a directory for descriptor files, sorted by path.
pub fn scan_directory(root: &Path, config: &PreviewConfig) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| config.is_descriptor(p) && !config.is_excluded(p))
        .collect();

    found.sort();
    found
}

/// Expand a mix of files and directories into descriptor files.
///
/// Files named explicitly are kept whatever their extension; directories
/// are scanned. A file reached twice (`a.hpp` and `.`) is kept once, at
/// its first position. Missing paths are returned separately so the
/// caller can report them.
pub fn collect_descriptors(paths: &[PathBuf], config: &PreviewConfig) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut files = Vec::new();
    let mut missing = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path, config));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            missing.push(path.clone());
        }
    }

    let mut seen = HashSet::new();
    files.retain(|p| seen.insert(fs::canonicalize(p).unwrap_or_else(|_| p.clone())));
    (files, missing)
}
