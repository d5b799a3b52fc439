//! Run-scoped key/value flags (verbosity, self-sync, ...).
use std::collections::HashMap;

/// Enable tracing of shell commands and priority display.
pub const VERBOSE: &str = "verbose";

/// Include the tool's own binary when syncing.
pub const SYNC_SELF: &str = "sync-self";

/// A flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Boolean switch.
    Bool(bool),
    /// Free-form text.
    Text(String),
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Flags set once by the command layer and read by items and drivers.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    values: HashMap<String, FlagValue>,
}

impl Flags {
    /// Create an empty flag bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<FlagValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<FlagValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Look up `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&FlagValue> {
        self.values.get(key)
    }

    /// `true` only if `key` is set to `Bool(true)`.
    #[must_use]
    pub fn bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(FlagValue::Bool(true)))
    }
}
