//! Include destination resolution inside a toolchain installation.
use std::path::{Path, PathBuf};

use crate::error::LinkError;
use crate::installation::InstallationPath;
use crate::platform::Platform;
use crate::reconcile::Operation;

/// The include directory computed for an installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeDestination {
    /// The directory exists and links may be placed in it.
    Present(PathBuf),
    /// The directory does not exist; only returned for [`Operation::Remove`],
    /// where it means there is nothing to remove.
    Absent(PathBuf),
}

impl IncludeDestination {
    /// The computed directory, whether or not it exists.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Present(p) | Self::Absent(p) => p,
        }
    }
}

/// Compute the include directory for `installation` on `platform`.
///
/// # Errors
///
/// - [`LinkError::UnsupportedPlatform`] when the host OS cannot host links.
/// - [`LinkError::Configuration`] when the directory is missing (or is not a
///   directory) and `operation` is [`Operation::Install`].
pub fn resolve_include_destination(
    installation: &InstallationPath,
    platform: &Platform,
    operation: Operation,
) -> Result<IncludeDestination, LinkError> {
    let dir = platform
        .include_dir(installation.as_path())
        .ok_or(LinkError::UnsupportedPlatform { os: platform.os })?;

    if dir.is_dir() {
        return Ok(IncludeDestination::Present(dir));
    }

    match operation {
        Operation::Remove => Ok(IncludeDestination::Absent(dir)),
        Operation::Install => Err(LinkError::configuration(
            &dir,
            "does not exist within the Arduino installation",
        )),
    }
}
