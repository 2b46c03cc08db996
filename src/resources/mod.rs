//! Idempotent resource primitives (inspect + apply/remove pattern).
pub mod header_link;

pub use header_link::HeaderLink;

use std::path::PathBuf;

use crate::error::LinkError;
use crate::sources::LinkPair;

/// Interface for destination-side objects the reconciler manages.
///
/// The reconciler only talks to this trait, which keeps the batch policy
/// (skip occupied, fail fast on I/O errors) testable without a filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait Resource {
    /// The source and destination this resource links.
    fn pair(&self) -> &LinkPair;

    /// Inspect the destination without changing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be inspected for a reason
    /// other than not existing.
    fn current_state(&self) -> Result<ResourceState, LinkError>;

    /// Create the link, replacing any existing link at the destination.
    ///
    /// Never touches an occupied destination; returns
    /// [`ResourceChange::Skipped`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing link cannot be removed or the new
    /// link cannot be created.
    fn apply(&self) -> Result<ResourceChange, LinkError>;

    /// Remove the link if the destination is one.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing link cannot be removed.
    fn remove(&self) -> Result<ResourceChange, LinkError>;
}

/// State of a destination path.
///
/// # Examples
///
/// ```
/// use arduino_include_links::resources::ResourceState;
/// use std::path::PathBuf;
///
/// let linked = ResourceState::Linked { current: PathBuf::from("/repo/include/vector") };
/// let occupied = ResourceState::Occupied { kind: "regular file".into() };
///
/// assert!(linked.is_manageable());
/// assert!(!occupied.is_manageable());
/// assert!(!ResourceState::Missing.is_manageable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the destination.
    Missing,
    /// The destination is a symbolic link (possibly dangling).
    Linked {
        /// Where the link currently points.
        current: PathBuf,
    },
    /// The destination is something other than a symbolic link.
    Occupied {
        /// What kind of object occupies it (e.g. `"regular file"`).
        kind: String,
    },
}

impl ResourceState {
    /// Whether the destination is a link this tool may replace or delete.
    #[must_use]
    pub const fn is_manageable(&self) -> bool {
        matches!(self, Self::Linked { .. })
    }
}

/// Result of applying or removing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// A new link was created where nothing existed.
    Created,
    /// An existing link was removed and recreated.
    Refreshed,
    /// A link was removed.
    Removed,
    /// Nothing needed doing.
    Unchanged,
    /// The destination is occupied by something this tool does not own.
    Skipped {
        /// Why the resource was skipped.
        reason: String,
    },
}
