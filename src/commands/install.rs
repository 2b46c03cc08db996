//! Install command implementation.
use crate::cli::VERSION;
use crate::error::LinkError;
use crate::reconcile::{self, Operation, ReconcileStats};
use crate::resolver::{self, IncludeDestination};
use crate::sources;

use super::Context;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the include directory is missing, the headers cannot
/// be listed, or a link cannot be created.
pub fn run(ctx: &Context<'_>) -> Result<ReconcileStats, LinkError> {
    ctx.log.debug(&format!("include-links {VERSION}"));

    ctx.log.stage("Resolving include directory");
    let destination = match resolver::resolve_include_destination(
        &ctx.installation,
        &ctx.platform,
        Operation::Install,
    )? {
        IncludeDestination::Present(dir) | IncludeDestination::Absent(dir) => dir,
    };
    ctx.log.info(&format!("destination: {}", destination.display()));

    let pairs = sources::enumerate_link_pairs(&ctx.repo_root, &destination)?;
    ctx.log.debug(&format!("{} header(s) found", pairs.len()));

    ctx.log.stage("Installing header links");
    let stats = reconcile::install_links(&pairs, ctx.dry_run, ctx.log)?;
    ctx.log.info(&stats.summary(ctx.dry_run));
    Ok(stats)
}
