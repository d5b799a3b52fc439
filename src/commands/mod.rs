//! Subcommand drivers and the setup they share.
pub mod boilerplate;
pub mod completions;
pub mod doctor;
pub mod init;
pub mod list;
pub mod sync;
pub mod uninstall;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::config::{self, Flags, Manifest};
use crate::items::{Context, Item, registry};
use crate::logging::Log;

/// Shared state produced by the common command setup sequence.
///
/// Loads the manifest, reports validation warnings, and builds the catalog
/// so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The parsed manifest.
    pub manifest: Manifest,
    /// Execution context the handlers run in.
    pub ctx: Context,
    /// Every item, highest priority first.
    pub catalog: Vec<Item>,
}

impl CommandSetup {
    /// Build a context for the real system and load the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, the
    /// manifest cannot be read or parsed, or an entry is malformed.
    pub fn init(global: &GlobalOpts, flags: Flags, log: &dyn Log) -> Result<Self> {
        let ctx = Context::new(flags)?;
        Self::with_context(global.config.as_deref(), ctx, log)
    }

    /// Load the manifest (explicit path or `~/.rogu`) for an existing context.
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn with_context(path: Option<&Path>, ctx: Context, log: &dyn Log) -> Result<Self> {
        let path = config::resolve_path(path, &ctx.home);
        log.debug(&format!("manifest: {}", path.display()));
        let manifest = config::load(&path)?;

        let warnings = config::validation::validate_all(&manifest);
        if !warnings.is_empty() {
            log.warn(&format!(
                "found {} manifest warning(s):",
                warnings.len()
            ));
            for warning in &warnings {
                log.warn(&format!(
                    "  {} [{}]: {}",
                    warning.source, warning.item, warning.message
                ));
            }
        }

        let catalog = registry::all(&registry::default_factories(), &manifest)
            .with_context(|| format!("building catalog from {}", path.display()))?;
        log.debug(&format!(
            "{} scripts, {} files, {} templates",
            manifest.scripts.len(),
            manifest.files.len(),
            manifest.templates.len()
        ));

        Ok(Self {
            manifest,
            ctx,
            catalog,
        })
    }
}

/// Items of `catalog` selected by `filters`, in catalog order.
pub fn select<'a>(catalog: &'a [Item], filters: &'a [String]) -> impl Iterator<Item = &'a Item> {
    catalog
        .iter()
        .filter(move |item| registry::matches(item, filters))
}

/// Label used for an item in console output; verbose runs show priority.
#[must_use]
pub fn label(item: &Item, ctx: &Context) -> String {
    if ctx.verbose() {
        format!("({:3}) {}", item.priority(), item.name())
    } else {
        item.name().to_string()
    }
}
