//! Execution context shared by item handlers.
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Flags;
use crate::config::flags::VERBOSE;
use crate::exec::{Executor, SystemExecutor};
use crate::fs;
use crate::url::{HttpProbe, UrlProbe};

/// Everything an item's handlers need from the outside world.
#[derive(Debug, Clone)]
pub struct Context {
    /// The user's home directory.
    pub home: PathBuf,
    /// Shell used for every external command.
    pub executor: Arc<dyn Executor>,
    /// Used to verify download URLs before fetching.
    pub probe: Arc<dyn UrlProbe>,
    /// Run-scoped flags.
    pub flags: Flags,
}

impl Context {
    /// Build a context for the real system.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new(flags: Flags) -> Result<Self> {
        let executor = SystemExecutor::new(flags.bool(VERBOSE));
        Ok(Self {
            home: fs::home_dir()?,
            executor: Arc::new(executor),
            probe: Arc::new(HttpProbe),
            flags,
        })
    }

    /// Build a context from explicit parts.
    #[must_use]
    pub fn with_parts(
        home: PathBuf,
        executor: Arc<dyn Executor>,
        probe: Arc<dyn UrlProbe>,
        flags: Flags,
    ) -> Self {
        Self {
            home,
            executor,
            probe,
            flags,
        }
    }

    /// Whether the verbose flag is set.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.flags.bool(VERBOSE)
    }
}
