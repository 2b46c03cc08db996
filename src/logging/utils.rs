//! Log file location and timestamp helpers.
use std::fs;
use std::path::PathBuf;

/// Directory name under the cache root holding log files.
const CACHE_SUBDIR: &str = "include-links";

/// Return `$XDG_CACHE_HOME/include-links/`, falling back to `~/.cache`.
///
/// The directory is created if needed; `None` if that fails.
fn cache_dir() -> Option<PathBuf> {
    let cache_root = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = cache_root.join(CACHE_SUBDIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path for `command` (`install` or `remove`).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{command}.log")))
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`, for the run header.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time as `HH:MM:SS`, for each line.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
