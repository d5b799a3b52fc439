//! Core logging types: item entries, status, and the [`Log`] trait.

/// Per-item result for summary reporting.
#[derive(Debug, Clone)]
pub struct ItemEntry {
    /// Item name.
    pub name: String,
    /// Final status of the item.
    pub status: ItemStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Outcome of processing one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// The operation succeeded or nothing needed doing.
    Ok,
    /// The item was left alone (missing handler, not selected).
    Skipped,
    /// The operation failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// Drivers log through this trait so integration tests can record what was
/// reported without installing a tracing subscriber.
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
    /// Log a passing verdict.
    fn good(&self, msg: &str);
    /// Log a failing verdict.
    fn bad(&self, msg: &str);
    /// Record an item result for the summary.
    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>);
}
