//! Operation dispatch: validate inputs, then run install or remove.
pub mod install;
pub mod remove;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
#[cfg(test)]
use crate::error::LinkError;
use crate::installation::InstallationPath;
use crate::logging::Log;
use crate::platform::Platform;
use crate::reconcile::{Operation, ReconcileStats};

/// Validated inputs shared by the install and remove commands.
pub struct Context<'a> {
    /// Canonical Arduino installation root.
    pub installation: InstallationPath,
    /// Repository root holding the `include/` directory.
    pub repo_root: PathBuf,
    /// Host platform.
    pub platform: Platform,
    /// Inspect only; never mutate the filesystem.
    pub dry_run: bool,
    /// Logging backend.
    pub log: &'a dyn Log,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("installation", &self.installation)
            .field("repo_root", &self.repo_root)
            .field("platform", &self.platform)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Validate the CLI arguments and build a context.
    ///
    /// The repository root defaults to the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the installation path is rejected or the working
    /// directory cannot be determined.
    pub fn from_cli(cli: &Cli, platform: Platform, log: &'a dyn Log) -> Result<Self> {
        let installation = InstallationPath::validate(&cli.arduino_installation_path)?;
        let repo_root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        Ok(Self {
            installation,
            repo_root,
            platform,
            dry_run: cli.dry_run,
            log,
        })
    }
}

/// Parse-to-completion entry point used by the binary.
///
/// # Errors
///
/// Returns an error if validation, resolution, or reconciliation fails.
pub fn run(cli: &Cli, log: &dyn Log) -> Result<ReconcileStats> {
    let ctx = Context::from_cli(cli, Platform::detect(), log)?;
    dispatch(cli.operation(), &ctx)
}

/// Run `operation` against a prepared context.
///
/// An unsupported platform is reported and treated as success with nothing
/// done.
///
/// # Errors
///
/// Returns an error if resolution, enumeration, or reconciliation fails.
pub fn dispatch(operation: Operation, ctx: &Context<'_>) -> Result<ReconcileStats> {
    let result = match operation {
        Operation::Install => install::run(ctx),
        Operation::Remove => remove::run(ctx),
    };

    match result {
        Err(e) if e.is_unsupported_platform() => {
            ctx.log.info(&format!("{e}; nothing to do"));
            Ok(ReconcileStats::default())
        }
        other => other.with_context(|| format!("{operation} failed")),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::RecordingLog;
    use crate::platform::Os;
    use clap::Parser as _;
    use std::fs;
    use std::path::Path;

    const SUBPATH: &str = "hardware/tools/avr/lib/avr/include";

    fn fixture(headers: &[&str]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("arduino").join(SUBPATH)).unwrap();
        fs::create_dir_all(tmp.path().join("repo/include")).unwrap();
        for h in headers {
            fs::write(tmp.path().join("repo/include").join(h), "").unwrap();
        }
        tmp
    }

    fn cli(root: &Path, extra: &[&str]) -> Cli {
        let arduino = root.join("arduino");
        let repo = root.join("repo");
        let mut args = vec![
            "include-links".to_string(),
            "-a".to_string(),
            arduino.display().to_string(),
            "--root".to_string(),
            repo.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    fn linux_context<'a>(root: &Path, log: &'a RecordingLog) -> Context<'a> {
        Context::from_cli(&cli(root, &[]), Platform::new(Os::Linux), log).unwrap()
    }

    #[test]
    fn from_cli_rejects_invalid_installation() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "include-links".to_string(),
            "-a".to_string(),
            tmp.path().display().to_string(),
        ]);
        let log = RecordingLog::default();
        let err = Context::from_cli(&cli, Platform::new(Os::Linux), &log).unwrap_err();
        assert!(err.downcast_ref::<LinkError>().is_some());
    }

    #[test]
    fn from_cli_defaults_root_to_cwd() {
        let tmp = fixture(&[]);
        let arduino = tmp.path().join("arduino");
        let cli = Cli::parse_from([
            "include-links".to_string(),
            "-a".to_string(),
            arduino.display().to_string(),
        ]);
        let log = RecordingLog::default();
        let ctx = Context::from_cli(&cli, Platform::new(Os::Linux), &log).unwrap();
        assert_eq!(ctx.repo_root, std::env::current_dir().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn dispatch_install_then_remove() {
        let tmp = fixture(&["vector", "utility"]);
        let log = RecordingLog::default();
        let ctx = linux_context(tmp.path(), &log);

        let installed = dispatch(Operation::Install, &ctx).unwrap();
        assert_eq!(installed.linked, 2);

        let removed = dispatch(Operation::Remove, &ctx).unwrap();
        assert_eq!(removed.removed, 2);
    }

    #[test]
    fn dispatch_unsupported_platform_is_noop_success() {
        let tmp = fixture(&["vector"]);
        let log = RecordingLog::default();
        let ctx =
            Context::from_cli(&cli(tmp.path(), &[]), Platform::new(Os::Windows), &log).unwrap();

        let stats = dispatch(Operation::Install, &ctx).unwrap();

        assert_eq!(stats, ReconcileStats::default());
        assert!(
            fs::symlink_metadata(tmp.path().join("arduino").join(SUBPATH).join("vector")).is_err()
        );
        assert_eq!(
            log.at("info"),
            vec!["Header links are not supported on windows; nothing to do"]
        );
    }

    #[test]
    fn dispatch_remove_with_missing_include_dir_is_noop() {
        let tmp = fixture(&["vector"]);
        fs::remove_dir(tmp.path().join("arduino").join(SUBPATH)).unwrap();
        let log = RecordingLog::default();
        let ctx = linux_context(tmp.path(), &log);

        let stats = dispatch(Operation::Remove, &ctx).unwrap();
        assert_eq!(stats, ReconcileStats::default());
    }

    #[test]
    fn dispatch_install_with_missing_include_dir_fails() {
        let tmp = fixture(&["vector"]);
        fs::remove_dir(tmp.path().join("arduino").join(SUBPATH)).unwrap();
        let log = RecordingLog::default();
        let ctx = linux_context(tmp.path(), &log);

        let err = dispatch(Operation::Install, &ctx).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LinkError>(),
            Some(LinkError::Configuration { .. })
        ));
    }

    #[test]
    fn dispatch_dry_run_changes_nothing() {
        let tmp = fixture(&["vector"]);
        let log = RecordingLog::default();
        let ctx =
            Context::from_cli(&cli(tmp.path(), &["--dry-run"]), Platform::new(Os::Linux), &log)
                .unwrap();

        let stats = dispatch(Operation::Install, &ctx).unwrap();

        assert_eq!(stats.linked, 1);
        assert!(
            fs::symlink_metadata(tmp.path().join("arduino").join(SUBPATH).join("vector")).is_err()
        );
    }
}
