//! Console logger with per-item summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{ItemEntry, ItemStatus, Log};
use super::subscriber::{BAD, GOOD, STAGE};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits through [`tracing`] and remembers every item result.
///
/// Every message also lands in `$XDG_CACHE_HOME/rogu/<command>.log` through
/// the file layer installed by [`init_subscriber`](super::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    items: Mutex<Vec<ItemEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`. Does not write to the log file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded item entries (test-only).
    #[cfg(test)]
    pub(crate) fn item_entries(&self) -> Vec<ItemEntry> {
        self.items.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error (stderr).
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning (stderr).
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    /// Log an informational line.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Suppressed on console unless verbose; always written to the log file.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a passing verdict (`✓`).
    pub fn good(&self, msg: &str) {
        tracing::info!(target: GOOD, "{msg}");
    }

    /// Log a failing verdict (`✗`).
    pub fn bad(&self, msg: &str) {
        tracing::info!(target: BAD, "{msg}");
    }

    /// Record an item result for the summary.
    pub fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.items.lock() {
            guard.push(ItemEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Print the summary of all recorded items.
    pub fn print_summary(&self) {
        let items = match self.items.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if items.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;

        for item in &items {
            let (icon, color) = match item.status {
                ItemStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                ItemStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                ItemStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = item
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", item.name));
        }

        let total = ok + skipped + failed;
        self.info(&format!(
            "{total} items: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, good, bad);

    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        self.record_item(name, status, message);
    }
}
