//! Tracing subscriber: console formatter, log file layer, and initialisation.
//!
//! Both outputs classify an event the same way ([`Kind`]) and differ only in
//! how they render it: the console gets colour and verdict marks, the log
//! file gets a timestamp and a plain tag.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target of stage headers.
pub(super) const STAGE: &str = "rogu::stage";
/// Target of passing doctor verdicts.
pub(super) const GOOD: &str = "rogu::good";
/// Target of failing doctor verdicts.
pub(super) const BAD: &str = "rogu::bad";

/// Presentation class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Good,
    Bad,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE) => Self::Stage,
            (Level::INFO, GOOD) => Self::Good,
            (Level::INFO, BAD) => Self::Bad,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    fn console(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::Good => format!("  \x1b[32m✓\x1b[0m {msg}"),
            Self::Bad => format!("  \x1b[31m✗\x1b[0m {msg}"),
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }

    fn file(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("==> {msg}"),
            Self::Info => format!("    {msg}"),
            Self::Good => format!("    [good] {msg}"),
            Self::Bad => format!("    [bad] {msg}"),
            Self::Error => format!("    [error] {msg}"),
            Self::Warn => format!("    [warn] {msg}"),
            Self::Debug => format!("    [debug] {msg}"),
        }
    }
}

/// The formatted `message` field of an event.
fn message(event: &tracing::Event<'_>) -> String {
    struct Message(String);

    impl tracing::field::Visit for Message {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    let mut visitor = Message(String::new());
    event.record(&mut visitor);
    visitor.0
}

/// A [`tracing_subscriber::Layer`] appending every event, ANSI codes
/// stripped, to `$XDG_CACHE_HOME/rogu/<command>.log`.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and write the run header.
    ///
    /// Returns `None` if the file cannot be created.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version = option_env!("ROGU_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let rule = "=".repeat(42);
        let header = format!("{rule}\nRogu {version} {command} {}\n{rule}\n", format_utc_datetime());
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let line = Kind::of(event.metadata()).file(&strip_ansi(&message(event)));
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "[{}] {line}", format_utc_time()).ok();
        }
    }
}

/// Console [`FormatEvent`](tracing_subscriber::fmt::FormatEvent) for rogu.
struct ConsoleFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormat
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
        writeln!(writer, "{}", Kind::of(event.metadata()).console(&message(event)))
    }
}

/// Install the global subscriber: console output (warnings and errors on
/// stderr, everything else on stdout; debug only when `verbose`) plus the
/// log file for `command`, which always receives debug events.
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
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));
    let console = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(writer)
        .with_filter(console_level);
    let file = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
