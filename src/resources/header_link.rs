//! Header symlink resource.
use std::fs;
use std::io;
use std::path::Path;

use super::{Resource, ResourceChange, ResourceState};
use crate::error::LinkError;
use crate::sources::LinkPair;

/// A symbolic link exposing one repository header inside the toolchain.
#[derive(Debug, Clone)]
pub struct HeaderLink {
    pair: LinkPair,
}

impl HeaderLink {
    /// Create a resource for `pair`.
    #[must_use]
    pub const fn new(pair: LinkPair) -> Self {
        Self { pair }
    }

    fn source(&self) -> &Path {
        &self.pair.source
    }

    fn destination(&self) -> &Path {
        &self.pair.destination
    }
}

impl From<LinkPair> for HeaderLink {
    fn from(pair: LinkPair) -> Self {
        Self::new(pair)
    }
}

impl Resource for HeaderLink {
    fn pair(&self) -> &LinkPair {
        &self.pair
    }

    fn current_state(&self) -> Result<ResourceState, LinkError> {
        inspect(self.destination())
    }

    fn apply(&self) -> Result<ResourceChange, LinkError> {
        let change = match inspect(self.destination())? {
            ResourceState::Occupied { kind } => {
                return Ok(ResourceChange::Skipped {
                    reason: format!("{kind} exists, not a symbolic link"),
                });
            }
            // Always unlink and relink, even if the target already matches
            ResourceState::Linked { .. } => {
                remove_symlink(self.destination())?;
                ResourceChange::Refreshed
            }
            ResourceState::Missing => ResourceChange::Created,
        };

        create_symlink(self.source(), self.destination())?;
        Ok(change)
    }

    fn remove(&self) -> Result<ResourceChange, LinkError> {
        if inspect(self.destination())?.is_manageable() {
            remove_symlink(self.destination())?;
            Ok(ResourceChange::Removed)
        } else {
            Ok(ResourceChange::Unchanged)
        }
    }
}

/// Classify whatever sits at `path` without following a final symlink.
fn inspect(path: &Path) -> Result<ResourceState, LinkError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ResourceState::Missing),
        Err(e) => return Err(LinkError::filesystem("inspect", path, e)),
    };

    let file_type = meta.file_type();
    if file_type.is_symlink() {
        let current =
            fs::read_link(path).map_err(|e| LinkError::filesystem("read link", path, e))?;
        return Ok(ResourceState::Linked { current });
    }

    let kind = if file_type.is_dir() {
        "directory"
    } else if file_type.is_file() {
        "regular file"
    } else {
        "special file"
    };
    Ok(ResourceState::Occupied {
        kind: kind.to_string(),
    })
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<(), LinkError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(not(unix))]
    let result = Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("symbolic links to {} are not supported here", target.display()),
    ));

    result.map_err(|e| LinkError::filesystem("create link", link, e))
}

/// Remove the symlink at `path` (not what it points to).
fn remove_symlink(path: &Path) -> Result<(), LinkError> {
    fs::remove_file(path).map_err(|e| LinkError::filesystem("remove link", path, e))
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use std::path::PathBuf;

    struct Fixture {
        _tmp: tempfile::TempDir,
        source: PathBuf,
        dest_dir: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("vector");
        fs::write(&source, "// vector").unwrap();
        let dest_dir = tmp.path().join("avr-include");
        fs::create_dir(&dest_dir).unwrap();
        Fixture {
            source,
            dest_dir,
            _tmp: tmp,
        }
    }

    fn link_for(f: &Fixture) -> HeaderLink {
        HeaderLink::new(LinkPair::new(f.source.clone(), f.dest_dir.join("vector")))
    }

    #[test]
    fn exposes_its_pair() {
        let f = fixture();
        let link = link_for(&f);
        assert_eq!(link.pair().source, f.source);
        assert_eq!(link.pair().destination, f.dest_dir.join("vector"));
    }

    #[test]
    fn missing_destination() {
        let f = fixture();
        assert_eq!(link_for(&f).current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn dangling_link_is_linked_not_missing() {
        let f = fixture();
        let dest = f.dest_dir.join("vector");
        symlink(f.dest_dir.join("gone"), &dest).unwrap();

        assert!(matches!(
            link_for(&f).current_state().unwrap(),
            ResourceState::Linked { .. }
        ));
    }

    #[test]
    fn regular_file_is_occupied() {
        let f = fixture();
        fs::write(f.dest_dir.join("vector"), "vendor copy").unwrap();
        assert_eq!(
            link_for(&f).current_state().unwrap(),
            ResourceState::Occupied {
                kind: "regular file".to_string()
            }
        );
    }

    #[test]
    fn directory_is_occupied() {
        let f = fixture();
        fs::create_dir(f.dest_dir.join("vector")).unwrap();
        assert_eq!(
            link_for(&f).current_state().unwrap(),
            ResourceState::Occupied {
                kind: "directory".to_string()
            }
        );
    }

    #[test]
    fn apply_creates_missing_link() {
        let f = fixture();
        let link = link_for(&f);

        assert_eq!(link.apply().unwrap(), ResourceChange::Created);
        assert_eq!(fs::read_link(f.dest_dir.join("vector")).unwrap(), f.source);
    }

    #[test]
    fn apply_refreshes_stale_link() {
        let f = fixture();
        let dest = f.dest_dir.join("vector");
        symlink(f.dest_dir.join("old-vector"), &dest).unwrap();

        assert_eq!(link_for(&f).apply().unwrap(), ResourceChange::Refreshed);
        assert_eq!(fs::read_link(&dest).unwrap(), f.source);
    }

    #[test]
    fn apply_refreshes_correct_link_too() {
        let f = fixture();
        let link = link_for(&f);
        link.apply().unwrap();

        assert_eq!(link.apply().unwrap(), ResourceChange::Refreshed);
        assert_eq!(fs::read_link(f.dest_dir.join("vector")).unwrap(), f.source);
    }

    #[test]
    fn apply_skips_regular_file() {
        let f = fixture();
        let dest = f.dest_dir.join("vector");
        fs::write(&dest, "vendor copy").unwrap();

        let change = link_for(&f).apply().unwrap();
        assert!(matches!(change, ResourceChange::Skipped { .. }));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "vendor copy");
    }

    #[test]
    fn remove_deletes_link_only() {
        let f = fixture();
        let link = link_for(&f);
        link.apply().unwrap();

        assert_eq!(link.remove().unwrap(), ResourceChange::Removed);
        assert!(fs::symlink_metadata(f.dest_dir.join("vector")).is_err());
        assert!(f.source.exists(), "source must survive link removal");
    }

    #[test]
    fn remove_leaves_regular_file() {
        let f = fixture();
        let dest = f.dest_dir.join("vector");
        fs::write(&dest, "vendor copy").unwrap();

        assert_eq!(link_for(&f).remove().unwrap(), ResourceChange::Unchanged);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "vendor copy");
    }

    #[test]
    fn remove_missing_is_unchanged() {
        let f = fixture();
        assert_eq!(link_for(&f).remove().unwrap(), ResourceChange::Unchanged);
    }

    #[test]
    fn apply_into_missing_directory_is_filesystem_error() {
        let f = fixture();
        let link = HeaderLink::new(LinkPair::new(
            f.source.clone(),
            f.dest_dir.join("nope").join("vector"),
        ));
        assert!(matches!(
            link.apply().unwrap_err(),
            LinkError::Filesystem {
                action: "create link",
                ..
            }
        ));
    }
}
