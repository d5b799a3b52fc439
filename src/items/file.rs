//! Remote files kept at a local path.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::context::Context;
use super::handlers::{ItemHandlers, action, presence};
use super::Item;
use crate::config::{FileEntry, Manifest};
use crate::error::{ConfigError, ItemError};
use crate::{fs, url};

/// Mode applied when a file entry does not set one.
pub const DEFAULT_MODE: u32 = 0o644;

/// A downloaded file with fixed permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    name: String,
    priority: i32,
    source: String,
    destination: String,
    mode: u32,
}

/// Build one item per `files` entry.
///
/// # Errors
///
/// Returns a [`ConfigError`] for a blank name, a missing `source` or
/// `destination`, or a `mode` that is not valid octal permissions.
pub fn items(manifest: &Manifest) -> Result<Vec<Item>, ConfigError> {
    manifest
        .files
        .iter()
        .map(|(name, entry)| FileItem::from_entry(name, entry).map(Item::File))
        .collect()
}

impl FileItem {
    /// Validate `entry` and build the item.
    ///
    /// # Errors
    ///
    /// See [`items`].
    pub fn from_entry(name: &str, entry: &FileEntry) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName { kind: "file" });
        }
        let missing = |field| ConfigError::MissingField {
            kind: "file",
            name: name.to_string(),
            field,
        };
        if entry.source.trim().is_empty() {
            return Err(missing("source"));
        }
        if entry.destination.trim().is_empty() {
            return Err(missing("destination"));
        }
        let mode = match &entry.mode {
            None => DEFAULT_MODE,
            Some(spec) => spec.bits().ok_or_else(|| ConfigError::InvalidMode {
                name: name.to_string(),
                value: spec.to_string(),
            })?,
        };
        Ok(Self {
            name: name.to_string(),
            priority: entry.priority,
            source: entry.source.trim().to_string(),
            destination: entry.destination.trim().to_string(),
            mode,
        })
    }

    /// Manifest key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Destination with `~` expanded.
    #[must_use]
    pub fn path(&self, home: &Path) -> PathBuf {
        fs::expand_home(&self.destination, home)
    }

    /// Build the handlers bound to `ctx`.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        let install = action(move || fetch(ctx, &self.source, &self.path(&ctx.home), self.mode));
        ItemHandlers {
            check: action(move || self.check(ctx)),
            is_installed: presence(move || Ok(self.path(&ctx.home).exists())),
            update: install.clone(),
            install,
            uninstall: action(move || fs::remove_existing(&self.path(&ctx.home))),
        }
    }

    fn check(&self, ctx: &Context) -> Result<()> {
        url::require(ctx.probe.as_ref(), &self.source)?;
        let path = self.path(&ctx.home);
        verify(&path, self.mode)
    }
}

/// Fail unless `path` exists with exactly `mode` permission bits.
pub(crate) fn verify(path: &Path, mode: u32) -> Result<()> {
    if !path.exists() {
        return Err(ItemError::PathMissing {
            path: path.display().to_string(),
        }
        .into());
    }
    if let Some(actual) = fs::mode_of(path)?
        && actual != mode
    {
        return Err(ItemError::WrongMode {
            path: path.display().to_string(),
            actual,
            expected: mode,
        }
        .into());
    }
    Ok(())
}

/// Download `source` to `dest` and set `mode`.
///
/// The URL is probed first so a missing file never truncates `dest`.
/// `.gz` and `.bz2` sources are decompressed on the fly.
pub(crate) fn fetch(ctx: &Context, source: &str, dest: &Path, mode: u32) -> Result<()> {
    url::require(ctx.probe.as_ref(), source)?;
    fs::ensure_parent_dir(dest)?;
    let script = fetch_command(source, dest);
    ctx.executor
        .run(&ctx.home, &script)
        .with_context(|| format!("downloading {source}"))?;
    fs::set_mode(dest, mode)
}

fn fetch_command(source: &str, dest: &Path) -> String {
    let from = shell_words::quote(source);
    let dest = dest.display().to_string();
    let to = shell_words::quote(&dest);
    match compression(source) {
        Some(tool) => format!("curl -fsSL {from} | {tool} -dc > {to}"),
        None => format!("curl -fsSL {from} -o {to}"),
    }
}

/// Decompressor for a `.gz` or `.bz2` source, matched case-insensitively.
fn compression(source: &str) -> Option<&'static str> {
    let ext = Path::new(source).extension()?;
    if ext.eq_ignore_ascii_case("gz") {
        Some("gzip")
    } else if ext.eq_ignore_ascii_case("bz2") {
        Some("bzip2")
    } else {
        None
    }
}
