//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path};
use crate::cli::VERSION;

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "include_links::stage";
/// Target used for links that were created, refreshed, or removed.
pub(super) const LINK_TARGET: &str = "include_links::link";
/// Target used for links a dry run would touch.
pub(super) const DRY_RUN_TARGET: &str = "include_links::dry_run";

/// Fields this crate puts on its events.
///
/// Link events carry `action`, `source`, and `destination` instead of a
/// message; everything else carries only `message`.
#[derive(Debug, Default, PartialEq, Eq)]
struct EventFields {
    message: String,
    action: Option<String>,
    source: Option<String>,
    destination: Option<String>,
}

impl EventFields {
    fn from_event(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn set(&mut self, name: &str, value: String) {
        match name {
            "message" => self.message = value,
            "action" => self.action = Some(value),
            "source" => self.source = Some(value),
            "destination" => self.destination = Some(value),
            _ => {}
        }
    }

    /// `created /avr/include/vector -> /repo/include/vector` for link
    /// events, the message otherwise.
    fn console_text(&self) -> String {
        match (&self.action, &self.source, &self.destination) {
            (Some(action), Some(source), Some(destination)) => {
                format!("{action} {destination} -> {source}")
            }
            _ => self.message.clone(),
        }
    }

    /// The message followed by any link fields as quoted `key="value"` pairs.
    fn file_text(&self) -> String {
        let mut text = self.message.clone();
        let pairs = [
            ("action", &self.action),
            ("destination", &self.destination),
            ("source", &self.source),
        ];
        for (key, value) in pairs {
            if let Some(value) = value {
                if !text.is_empty() {
                    text.push(' ');
                }
                write!(text, "{key}={value:?}").ok();
            }
        }
        text
    }
}

impl tracing::field::Visit for EventFields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.set(field.name(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.set(field.name(), value.to_string());
    }
}

/// Render one log-file line.
fn file_line(level: Level, target: &str, fields: &EventFields, ts: &str) -> String {
    let text = fields.file_text();
    match (level, target) {
        (Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {text}"),
        (Level::INFO, LINK_TARGET) => format!("[{ts}]     [link] {text}"),
        (Level::INFO, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {text}"),
        (Level::ERROR, _) => format!("[{ts}]     [error] {text}"),
        (Level::WARN, _) => format!("[{ts}]     [warn] {text}"),
        (Level::DEBUG, _) => format!("[{ts}]     [debug] {text}"),
        _ => format!("[{ts}]     {text}"),
    }
}

/// A [`tracing_subscriber::Layer`] appending every event to a log file.
///
/// The file is truncated and given a run header on the first event, not at
/// construction, so an invocation rejected during argument validation keeps
/// the previous run's log.
#[derive(Debug)]
pub(super) struct FileLayer {
    path: PathBuf,
    file: Mutex<Option<fs::File>>,
}

impl FileLayer {
    /// A layer for `command` under the cache directory.
    ///
    /// Returns `None` if the cache directory cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        log_file_path(command).map(Self::at)
    }

    /// A layer writing to `path`.
    pub(super) const fn at(path: PathBuf) -> Self {
        Self {
            path,
            file: Mutex::new(None),
        }
    }

    fn open(&self) -> Option<fs::File> {
        let header = format!(
            "==========================================\n\
             include-links {VERSION} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&self.path, header).ok()?;
        fs::OpenOptions::new().append(true).open(&self.path).ok()
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let fields = EventFields::from_event(event);
        let line = file_line(*metadata.level(), metadata.target(), &fields, &format_utc_time());

        if let Ok(mut guard) = self.file.lock() {
            if guard.is_none() {
                *guard = self.open();
            }
            if let Some(file) = guard.as_mut() {
                writeln!(file, "{line}").ok();
            }
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] for terse console output.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let target = metadata.target();
        let text = EventFields::from_event(event).console_text();

        match *metadata.level() {
            Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {text}"),
            Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {text}"),
            Level::INFO if target == STAGE_TARGET => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{text}\x1b[0m")
            }
            Level::INFO if target == DRY_RUN_TARGET => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {text}")
            }
            Level::INFO => writeln!(writer, "  {text}"),
            _ => writeln!(writer, "  \x1b[2m{text}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout (info and below) and stderr (warnings and
/// errors); `debug` only reaches the console when `verbose` is set. Every
/// event, `debug` included, is appended to
/// `$XDG_CACHE_HOME/include-links/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
