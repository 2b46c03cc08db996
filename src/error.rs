//! Domain-specific error types for header link management.
//!
//! Library modules return [`LinkError`] while command handlers at the CLI
//! boundary convert it to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error taxonomy
//!
//! ```text
//! LinkError
//! ├── Configuration        — include directories missing or unusable
//! ├── InvalidPath          — user-supplied installation path rejected
//! ├── UnsupportedPlatform  — host OS cannot host header links
//! └── Filesystem           — unexpected OS failure while linking/unlinking
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::platform::Os;

/// Errors raised while validating inputs or reconciling header links.
#[derive(Error, Debug)]
pub enum LinkError {
    /// A directory the tool depends on is missing or unusable.
    #[error("Configuration error: {} {reason}", path.display())]
    Configuration {
        /// Directory that failed the check.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// The user-supplied installation path failed validation.
    #[error("{} {reason}", path.display())]
    InvalidPath {
        /// Path exactly as supplied by the user.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// Header links are not supported on the host operating system.
    #[error("Header links are not supported on {os}")]
    UnsupportedPlatform {
        /// Detected operating system family.
        os: Os,
    },

    /// An OS-level failure while creating, removing, or inspecting a link.
    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        /// What the tool was doing (e.g. `"create link"`).
        action: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LinkError {
    /// Build a [`LinkError::Configuration`].
    pub fn configuration(path: &Path, reason: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`LinkError::InvalidPath`].
    pub fn invalid_path(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Build a [`LinkError::Filesystem`].
    pub fn filesystem(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error is the unsupported-platform signal.
    #[must_use]
    pub const fn is_unsupported_platform(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform { .. })
    }
}
