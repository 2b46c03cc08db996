//! Link reconciliation: install (create/refresh) and remove header links.
//!
//! Both operations walk the batch in order. An occupied destination is a
//! warning and the batch continues; any filesystem error aborts the batch
//! immediately, leaving already-applied links in place. Both operations are
//! idempotent, so re-running after a failure is safe.
use std::fmt;

use crate::error::LinkError;
use crate::logging::{Log, LinkRecord};
use crate::resources::{HeaderLink, Resource, ResourceChange, ResourceState};
use crate::sources::LinkPair;

/// Which reconciliation to perform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operation {
    /// Create or refresh links.
    #[default]
    Install,
    /// Delete links.
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// Counters for one reconciliation batch.
///
/// # Examples
///
/// ```
/// use arduino_include_links::reconcile::ReconcileStats;
///
/// let stats = ReconcileStats { linked: 2, refreshed: 1, removed: 0, skipped: 1 };
/// assert_eq!(stats.summary(false), "2 linked, 1 refreshed, 1 skipped");
/// assert_eq!(stats.summary(true), "2 would link, 1 would refresh, 1 skipped");
/// assert_eq!(ReconcileStats::default().summary(false), "nothing to do");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Links created where nothing existed.
    pub linked: u32,
    /// Existing links removed and recreated.
    pub refreshed: u32,
    /// Links deleted.
    pub removed: u32,
    /// Destinations left alone because something else occupies them.
    pub skipped: u32,
}

impl ReconcileStats {
    /// Total number of link mutations (performed or planned).
    #[must_use]
    pub const fn changed(&self) -> u32 {
        self.linked + self.refreshed + self.removed
    }

    /// Format the summary line, omitting zero counters.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        if self.changed() == 0 && self.skipped == 0 {
            return "nothing to do".to_string();
        }

        let verbs = if dry_run {
            ["would link", "would refresh", "would remove"]
        } else {
            ["linked", "refreshed", "removed"]
        };
        let counts = [self.linked, self.refreshed, self.removed];

        let mut parts: Vec<String> = counts
            .iter()
            .zip(verbs)
            .filter(|(n, _)| **n > 0)
            .map(|(n, verb)| format!("{n} {verb}"))
            .collect();
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        parts.join(", ")
    }
}

/// Create or refresh a symbolic link for every pair.
///
/// # Errors
///
/// Returns the first [`LinkError`] raised while inspecting, removing, or
/// creating a link; remaining pairs are not processed.
pub fn install_links(
    pairs: &[LinkPair],
    dry_run: bool,
    log: &dyn Log,
) -> Result<ReconcileStats, LinkError> {
    install_resources(&header_links(pairs), dry_run, log)
}

/// Remove every destination that is currently a symbolic link.
///
/// # Errors
///
/// Returns the first [`LinkError`] raised while inspecting or removing a
/// link; remaining pairs are not processed.
pub fn remove_links(
    pairs: &[LinkPair],
    dry_run: bool,
    log: &dyn Log,
) -> Result<ReconcileStats, LinkError> {
    remove_resources(&header_links(pairs), dry_run, log)
}

fn header_links(pairs: &[LinkPair]) -> Vec<HeaderLink> {
    pairs.iter().cloned().map(HeaderLink::from).collect()
}

fn record<'a>(action: &'a str, pair: &'a LinkPair, planned: bool) -> LinkRecord<'a> {
    LinkRecord {
        action,
        source: &pair.source,
        destination: &pair.destination,
        planned,
    }
}

/// Install loop over any [`Resource`].
///
/// # Errors
///
/// Propagates the first resource error.
pub fn install_resources<R: Resource>(
    resources: &[R],
    dry_run: bool,
    log: &dyn Log,
) -> Result<ReconcileStats, LinkError> {
    let mut stats = ReconcileStats::default();

    for resource in resources {
        let pair = resource.pair();
        if dry_run {
            match resource.current_state()? {
                ResourceState::Missing => {
                    log.link(&record("would link", pair, true));
                    stats.linked += 1;
                }
                ResourceState::Linked { .. } => {
                    log.link(&record("would refresh", pair, true));
                    stats.refreshed += 1;
                }
                ResourceState::Occupied { kind } => {
                    log.warn(&format!(
                        "{pair}: {kind} exists, not a symbolic link - would not overwrite"
                    ));
                    stats.skipped += 1;
                }
            }
            continue;
        }

        match resource.apply()? {
            ResourceChange::Created => {
                log.link(&record("created", pair, false));
                stats.linked += 1;
            }
            ResourceChange::Refreshed => {
                log.link(&record("refreshed", pair, false));
                stats.refreshed += 1;
            }
            ResourceChange::Skipped { reason } => {
                log.warn(&format!("{pair}: {reason} - not overwriting"));
                stats.skipped += 1;
            }
            ResourceChange::Removed | ResourceChange::Unchanged => {}
        }
    }

    Ok(stats)
}

/// Remove loop over any [`Resource`].
///
/// # Errors
///
/// Propagates the first resource error.
pub fn remove_resources<R: Resource>(
    resources: &[R],
    dry_run: bool,
    log: &dyn Log,
) -> Result<ReconcileStats, LinkError> {
    let mut stats = ReconcileStats::default();

    for resource in resources {
        let pair = resource.pair();
        if dry_run {
            if resource.current_state()?.is_manageable() {
                log.link(&record("would remove", pair, true));
                stats.removed += 1;
            }
            continue;
        }

        match resource.remove()? {
            ResourceChange::Removed => {
                log.link(&record("removed", pair, false));
                stats.removed += 1;
            }
            ResourceChange::Created
            | ResourceChange::Refreshed
            | ResourceChange::Unchanged
            | ResourceChange::Skipped { .. } => {}
        }
    }

    Ok(stats)
}
