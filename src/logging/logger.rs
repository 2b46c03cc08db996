//! Tracing-backed logger.
use std::path::PathBuf;

use super::subscriber::{DRY_RUN_TARGET, LINK_TARGET, STAGE_TARGET};
use super::types::{Log, LinkRecord};
use super::utils::log_file_path;

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits [`tracing`] events under the crate's console targets.
///
/// Messages reach the console and the persistent log file at
/// `$XDG_CACHE_HOME/include-links/<command>.log` through the subscriber
/// installed by [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

#[allow(clippy::unused_self)]
impl Logger {
    /// Create a logger for `command`.
    ///
    /// Only remembers the log file path for display; the file itself is
    /// written by the subscriber's file layer on the first event.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger reporting an explicit log file path.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only when verbose; always in the file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Emit a per-link event with `action`, `source` and `destination` fields.
    pub fn link(&self, record: &LinkRecord<'_>) {
        let source = record.source.display();
        let destination = record.destination.display();
        if record.planned {
            tracing::info!(
                target: DRY_RUN_TARGET,
                action = record.action,
                source = %source,
                destination = %destination
            );
        } else {
            tracing::info!(
                target: LINK_TARGET,
                action = record.action,
                source = %source,
                destination = %destination
            );
        }
    }

    /// Point the user at the log file once a run has finished.
    pub fn report_log_path(&self) {
        if let Some(path) = &self.log_file {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn link(&self, record: &LinkRecord<'_>) {
        self.link(record);
    }
}
