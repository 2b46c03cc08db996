// Shared helpers for integration tests.
//
// Builds an isolated fake Arduino installation and a fake header repository
// inside one temporary directory, so each test can run install/remove
// without touching the real filesystem.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use arduino_include_links::commands::{self, Context};
use arduino_include_links::installation::InstallationPath;
use arduino_include_links::logging::Logger;
use arduino_include_links::platform::{Os, Platform};
use arduino_include_links::reconcile::{Operation, ReconcileStats};

/// Include directory layout inside the fake installation.
pub const INCLUDE_SUBPATH: &str = "hardware/tools/avr/lib/avr/include";

/// An isolated installation + repository pair backed by a [`tempfile::TempDir`].
pub struct Fixture {
    pub tmp: tempfile::TempDir,
    log: Logger,
}

impl Fixture {
    /// Root of the fake Arduino installation.
    pub fn installation(&self) -> PathBuf {
        self.tmp.path().join("arduino")
    }

    /// Root of the fake header repository.
    pub fn repo(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    /// The include destination directory inside the installation.
    pub fn destination(&self) -> PathBuf {
        self.installation().join(INCLUDE_SUBPATH)
    }

    /// Path of `name` inside the destination directory.
    pub fn dest(&self, name: &str) -> PathBuf {
        self.destination().join(name)
    }

    /// Path of `name` inside the repository's include directory.
    pub fn source(&self, name: &str) -> PathBuf {
        dunce::canonicalize(self.repo())
            .expect("canonical repo")
            .join("include")
            .join(name)
    }

    /// Build a context as the binary would on Linux.
    pub fn context(&self, dry_run: bool) -> Context<'_> {
        Context {
            installation: InstallationPath::validate(&self.installation())
                .expect("valid installation"),
            repo_root: self.repo(),
            platform: Platform::new(Os::Linux),
            dry_run,
            log: &self.log,
        }
    }

    /// Run `operation` and return its statistics.
    pub fn run(&self, operation: Operation) -> anyhow::Result<ReconcileStats> {
        commands::dispatch(operation, &self.context(false))
    }

    pub fn install(&self) -> ReconcileStats {
        self.run(Operation::Install).expect("install")
    }

    pub fn remove(&self) -> ReconcileStats {
        self.run(Operation::Remove).expect("remove")
    }

    /// Whether `path` is a symbolic link (dangling or not).
    pub fn is_link(path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
    }

    /// Sorted names of every entry in the destination directory.
    pub fn destination_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.destination())
            .expect("read destination")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Fluent builder for [`Fixture`].
pub struct FixtureBuilder {
    fixture: Fixture,
}

impl FixtureBuilder {
    /// A valid installation (with include directory) and an empty `include/`.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let fixture = Fixture {
            tmp,
            log: Logger::with_log_file(None),
        };
        fs::create_dir_all(fixture.destination()).expect("create include destination");
        fs::create_dir_all(fixture.repo().join("include")).expect("create repo include");
        Self { fixture }
    }

    /// Add a header file to the repository.
    pub fn with_header(self, name: &str) -> Self {
        fs::write(
            self.fixture.repo().join("include").join(name),
            format!("// {name}\n"),
        )
        .expect("write header");
        self
    }

    /// Add a subdirectory to the repository's include directory.
    pub fn with_include_subdir(self, name: &str) -> Self {
        let dir = self.fixture.repo().join("include").join(name);
        fs::create_dir_all(&dir).expect("create include subdir");
        fs::write(dir.join("nested.h"), "").expect("write nested header");
        self
    }

    /// Place a regular file in the destination directory.
    pub fn with_foreign_file(self, name: &str, content: &str) -> Self {
        fs::write(self.fixture.dest(name), content).expect("write foreign file");
        self
    }

    /// Delete the include destination directory.
    pub fn without_destination(self) -> Self {
        fs::remove_dir(self.fixture.destination()).expect("remove include destination");
        self
    }

    pub fn build(self) -> Fixture {
        self.fixture
    }
}
