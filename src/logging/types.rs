//! The [`Log`] trait shared by every logging backend.
use std::path::Path;

/// What happened, or in a dry run would happen, to one header link.
///
/// Backends keep the paths as separate fields rather than folding them into
/// a message, so the log file stays greppable by source or destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRecord<'a> {
    /// Past-tense verb such as `"created"`, or `"would link"` when planned.
    pub action: &'a str,
    /// Header file in the repository.
    pub source: &'a Path,
    /// Link location inside the include directory.
    pub destination: &'a Path,
    /// Whether the action was only planned (dry run).
    pub planned: bool,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to [`tracing`]; reconciliation
/// code only sees this trait so it can be exercised with an in-memory log.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a per-link outcome.
    fn link(&self, record: &LinkRecord<'_>);
}
