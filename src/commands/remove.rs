//! Remove command implementation.
use crate::error::LinkError;
use crate::reconcile::{self, Operation, ReconcileStats};
use crate::resolver::{self, IncludeDestination};
use crate::sources;

use super::Context;

/// Run the remove command.
///
/// A missing include directory means there is nothing to remove.
///
/// # Errors
///
/// Returns an error if the headers cannot be listed or a link cannot be
/// removed.
pub fn run(ctx: &Context<'_>) -> Result<ReconcileStats, LinkError> {
    ctx.log.stage("Resolving include directory");
    let destination = match resolver::resolve_include_destination(
        &ctx.installation,
        &ctx.platform,
        Operation::Remove,
    )? {
        IncludeDestination::Present(dir) => dir,
        IncludeDestination::Absent(dir) => {
            ctx.log.info(&format!(
                "{} does not exist; nothing to remove",
                dir.display()
            ));
            return Ok(ReconcileStats::default());
        }
    };
    ctx.log.info(&format!("destination: {}", destination.display()));

    let pairs = sources::enumerate_link_pairs(&ctx.repo_root, &destination)?;
    ctx.log.debug(&format!("{} header(s) found", pairs.len()));

    ctx.log.stage("Removing header links");
    let stats = reconcile::remove_links(&pairs, ctx.dry_run, ctx.log)?;
    ctx.log.info(&stats.summary(ctx.dry_run));
    Ok(stats)
}
