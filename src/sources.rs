//! Enumeration of the header files shipped in the repository.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LinkError;

/// Name of the directory, relative to the repository root, holding headers.
pub const INCLUDE_DIR: &str = "include";

/// One symbolic link to create or remove.
///
/// # Examples
///
/// ```
/// use arduino_include_links::sources::LinkPair;
/// use std::path::PathBuf;
///
/// let pair = LinkPair::new(
///     PathBuf::from("/repo/include/vector"),
///     PathBuf::from("/avr/include/vector"),
/// );
/// assert_eq!(pair.to_string(), "/avr/include/vector -> /repo/include/vector");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPair {
    /// Absolute path of the header file in the repository.
    pub source: PathBuf,
    /// Absolute path of the link inside the include destination directory.
    pub destination: PathBuf,
}

impl LinkPair {
    /// Create a new link pair.
    #[must_use]
    pub const fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl fmt::Display for LinkPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.destination.display(),
            self.source.display()
        )
    }
}

/// List the regular files directly inside `<repo_root>/include` and pair
/// each with its path under `destination`.
///
/// Subdirectories are skipped without recursion. Entries that resolve to
/// regular files through a symbolic link are included. The result is sorted
/// by file name.
///
/// # Errors
///
/// - [`LinkError::Configuration`] if the include directory is missing.
/// - [`LinkError::Filesystem`] if the directory cannot be listed.
pub fn enumerate_link_pairs(
    repo_root: &Path,
    destination: &Path,
) -> Result<Vec<LinkPair>, LinkError> {
    let root = dunce::canonicalize(repo_root)
        .map_err(|e| LinkError::filesystem("resolve repository root", repo_root, e))?;
    let include = root.join(INCLUDE_DIR);
    if !include.is_dir() {
        return Err(LinkError::configuration(
            &include,
            "does not exist; run from the repository root or pass --root",
        ));
    }

    let entries =
        fs::read_dir(&include).map_err(|e| LinkError::filesystem("list", &include, e))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LinkError::filesystem("read entry in", &include, e))?;
        let source = entry.path();
        if !source.is_file() {
            continue;
        }
        pairs.push(LinkPair::new(source, destination.join(entry.file_name())));
    }
    pairs.sort_by(|a, b| a.destination.cmp(&b.destination));
    Ok(pairs)
}
