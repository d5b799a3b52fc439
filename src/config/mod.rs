//! Manifest model and loading.
//!
//! The manifest is YAML by default; a path ending in `.toml` is parsed as
//! TOML instead. Keys are kebab-case in both formats.
pub mod flags;
pub mod validation;

pub use flags::{FlagValue, Flags};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Branch used when an entry does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Parsed manifest.
///
/// Maps are ordered so that catalog construction, and therefore tie-breaking
/// between equal priorities, is deterministic.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
    /// Shell-snippet items, keyed by name.
    pub scripts: BTreeMap<String, ScriptEntry>,
    /// Managed remote files, keyed by name.
    pub files: BTreeMap<String, FileEntry>,
    /// Git template repositories, keyed by name.
    pub templates: BTreeMap<String, TemplateEntry>,
    /// The dotfiles repository.
    pub dotfiles: DotfilesEntry,
    /// Where the tool downloads itself from.
    #[serde(rename = "self", alias = "rogu")]
    pub self_update: SelfEntry,
    /// Boilerplate file server.
    pub boilerplates: BoilerplatesEntry,
}

/// A named bundle of shell snippets.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScriptEntry {
    /// Ordering hint; higher runs first.
    pub priority: i32,
    /// Audit snippet; falls back to `is_installed` when empty.
    pub check: String,
    /// Presence test; exit 0 means installed.
    pub is_installed: String,
    /// Installer snippet.
    pub install: String,
    /// Uninstaller snippet.
    pub uninstall: String,
    /// Updater snippet.
    pub update: String,
    /// Use the installer as the updater.
    pub update_with_install: bool,
}

/// A remote file kept at a local path.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileEntry {
    /// Ordering hint; higher runs first.
    pub priority: i32,
    /// Download URL. `.gz` and `.bz2` suffixes are decompressed.
    pub source: String,
    /// Local path; a leading `~` expands to home.
    pub destination: String,
    /// Permission bits; defaults to `0644`.
    pub mode: Option<ModeSpec>,
}

/// File mode as written in the manifest.
///
/// Strings are parsed as octal (`"0755"`, `"755"`); integers are taken as
/// the literal mode value (`0o755` in YAML or TOML).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ModeSpec {
    /// Literal numeric mode.
    Number(u32),
    /// Octal digits.
    Text(String),
}

impl ModeSpec {
    /// Resolve to permission bits, or `None` if the value is not a valid mode.
    #[must_use]
    pub fn bits(&self) -> Option<u32> {
        let bits = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let s = s.trim();
                let digits = s.strip_prefix("0o").unwrap_or(s);
                u32::from_str_radix(digits, 8).ok()?
            }
        };
        (bits <= 0o7777).then_some(bits)
    }
}

impl std::fmt::Display for ModeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A git repository cloned under home for use as a project template.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateEntry {
    /// Ordering hint; higher runs first.
    pub priority: i32,
    /// Clone URL.
    pub url: String,
    /// Tracked branch; empty means [`DEFAULT_BRANCH`].
    pub branch: String,
}

/// The bare dotfiles repository.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DotfilesEntry {
    /// Clone URL; without it the dotfiles cannot be installed.
    pub url: Option<String>,
    /// Tracked branch; empty means [`DEFAULT_BRANCH`].
    pub branch: String,
}

/// Download location of the tool's own binary.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SelfEntry {
    /// Download URL; `{os}` and `{arch}` are substituted.
    pub url: Option<String>,
    /// Install path; a leading `~` expands to home.
    pub path: Option<String>,
}

/// Base URL for `rogu boilerplate`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BoilerplatesEntry {
    /// Directory URL that boilerplate file names are appended to.
    pub url_dir: Option<String>,
}

/// Return `branch`, or [`DEFAULT_BRANCH`] when it is empty.
#[must_use]
pub fn branch_or_default(branch: &str) -> String {
    if branch.trim().is_empty() {
        DEFAULT_BRANCH.to_string()
    } else {
        branch.trim().to_string()
    }
}

/// Resolve the manifest path: explicit flag, then `ROGU_CONFIG` (handled by
/// clap), then `~/.rogu`.
#[must_use]
pub fn resolve_path(explicit: Option<&Path>, home: &Path) -> PathBuf {
    explicit.map_or_else(|| home.join(".rogu"), Path::to_path_buf)
}

/// Load and parse the manifest at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::InvalidSyntax`] if it cannot be parsed.
pub fn load(path: &Path) -> Result<Manifest, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    parse(&content, is_toml).map_err(|message| ConfigError::InvalidSyntax {
        path: path.display().to_string(),
        message,
    })
}

/// Parse manifest text as TOML (`is_toml`) or YAML.
///
/// # Errors
///
/// Returns the parser's message on failure.
pub fn parse(content: &str, is_toml: bool) -> Result<Manifest, String> {
    if is_toml {
        toml::from_str(content).map_err(|e| e.to_string())
    } else if content.trim().is_empty() {
        Ok(Manifest::default())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}
