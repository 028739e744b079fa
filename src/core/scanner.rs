//! Source tree discovery
//!
//! Recursively discovers source files under a root directory, filtered by
//! extension. The resulting set is deduplicated and lexicographically ordered
//! by full path so repeated scans of an unchanged tree are identical, keeping
//! builds reproducible.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// An ordered, deduplicated set of source file paths.
///
/// Built once per scan and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    paths: Vec<PathBuf>,
}

impl SourceSet {
    /// The discovered paths, in lexicographic order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of discovered files
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the scan found no files
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the discovered paths
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Scan a directory tree for source files matching the given extensions.
///
/// Extension matching is case-sensitive, so `.S` assembly files are
/// recognized while `.s` is not. A missing root is a normal condition (a
/// board may simply have no variant-specific folder) and yields an empty
/// set rather than an error.
pub fn scan_tree(root: &Path, extensions: &[&str]) -> SourceSet {
    if !root.is_dir() {
        return SourceSet::default();
    }

    // Canonicalize so every entry is an absolute path regardless of how the
    // root was spelled.
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    let paths: BTreeSet<PathBuf> = walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
        })
        .map(|entry| entry.into_path())
        .collect();

    SourceSet {
        paths: paths.into_iter().collect(),
    }
}
