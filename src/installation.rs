//! Validation of the user-supplied Arduino installation path.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LinkError;

/// A predicate recognising a directory as a toolchain installation.
///
/// Validation runs every signature check through this trait so stricter or
/// different layouts can be recognised without touching reconciliation.
#[cfg_attr(test, mockall::automock)]
pub trait InstallationSignature {
    /// Return `true` if `root` looks like a toolchain installation.
    fn matches(&self, root: &Path) -> bool;

    /// Short description used in the rejection message.
    fn description(&self) -> String;
}

/// Recognises an Arduino installation by its `hardware/` subdirectory.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareDirSignature;

impl InstallationSignature for HardwareDirSignature {
    fn matches(&self, root: &Path) -> bool {
        root.join("hardware").is_dir()
    }

    fn description(&self) -> String {
        "is not a valid Arduino installation path (no hardware directory)".to_string()
    }
}

/// A validated, canonical Arduino installation root.
///
/// Only constructible through [`InstallationPath::validate`] or
/// [`InstallationPath::validate_with`], so holding one means the path
/// existed, was a readable directory, and matched the signature when the
/// tool started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationPath(PathBuf);

impl InstallationPath {
    /// Validate `path` with the default [`HardwareDirSignature`].
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidPath`] if any check fails.
    pub fn validate(path: &Path) -> Result<Self, LinkError> {
        Self::validate_with(path, &HardwareDirSignature)
    }

    /// Validate `path` against an arbitrary signature and canonicalize it.
    ///
    /// Checks run in order: existence and directory-ness, signature,
    /// readability. The first failure wins.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidPath`] if any check fails or the path
    /// cannot be canonicalized.
    pub fn validate_with(
        path: &Path,
        signature: &dyn InstallationSignature,
    ) -> Result<Self, LinkError> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(LinkError::invalid_path(path, "is not a directory")),
            Err(_) => return Err(LinkError::invalid_path(path, "is not a valid path")),
        }

        if !signature.matches(path) {
            return Err(LinkError::invalid_path(path, signature.description()));
        }

        if let Err(e) = fs::read_dir(path) {
            let reason = if e.kind() == io::ErrorKind::PermissionDenied {
                "is not a readable path".to_string()
            } else {
                format!("is not a readable path: {e}")
            };
            return Err(LinkError::invalid_path(path, reason));
        }

        let canonical = dunce::canonicalize(path)
            .map_err(|e| LinkError::invalid_path(path, format!("cannot be resolved: {e}")))?;
        Ok(Self(canonical))
    }

    /// The canonical installation root.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for InstallationPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
