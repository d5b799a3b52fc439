//! Domain-specific error types for rogu.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`], [`ItemError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! RoguError
//! ├── Config(ConfigError) — manifest loading and malformed entries
//! ├── Item(ItemError)     — capability absence, failed checks, preconditions
//! ├── Git(GitError)       — repository lookup
//! └── Exec(ExecError)     — non-zero exits from shell invocations
//! ```

use thiserror::Error;

/// Top-level error type for rogu.
#[derive(Error, Debug)]
pub enum RoguError {
    /// Manifest loading or validation error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Item lifecycle error.
    #[error("Item error: {0}")]
    Item(#[from] ItemError),

    /// Repository client error.
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Shell execution error.
    #[error("Execution error: {0}")]
    Exec(#[from] ExecError),
}

/// Errors that arise from the manifest. Always fatal when building the catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest file could not be read.
    #[error("IO error reading manifest {path}: {source}")]
    Io {
        /// Path of the manifest.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest could not be parsed.
    #[error("Invalid manifest {path}: {message}")]
    InvalidSyntax {
        /// Path of the manifest.
        path: String,
        /// Parser message.
        message: String,
    },

    /// An entry was declared with an empty name.
    #[error("{kind} entry with an empty name")]
    EmptyName {
        /// Entry kind (`script`, `file`, `template`).
        kind: &'static str,
    },

    /// A required field is missing or empty.
    #[error("{kind} '{name}' is missing required field '{field}'")]
    MissingField {
        /// Entry kind.
        kind: &'static str,
        /// Entry name.
        name: String,
        /// Field name as written in the manifest.
        field: &'static str,
    },

    /// A file mode could not be parsed as octal permissions.
    #[error("file '{name}' has invalid mode '{value}'")]
    InvalidMode {
        /// Entry name.
        name: String,
        /// Offending value.
        value: String,
    },
}

/// Errors raised by item handlers and the drivers.
#[derive(Error, Debug)]
pub enum ItemError {
    /// The item cannot tell whether it is installed, so it cannot be synced.
    #[error("{name} has no installation check")]
    NoInstalledCheck {
        /// Item name.
        name: String,
    },

    /// The item has no check handler.
    #[error("{name} has no check")]
    NoCheck {
        /// Item name.
        name: String,
    },

    /// The item is missing and has no installer.
    #[error("I don't know how to install {name}")]
    NoInstaller {
        /// Item name.
        name: String,
    },

    /// A check snippet exited non-zero.
    #[error("check failed with exit code {code}{}", format_output(.output))]
    CheckFailed {
        /// Exit code of the snippet.
        code: i32,
        /// Captured combined output.
        output: String,
    },

    /// A source URL did not answer with 200.
    #[error("file not found: {url} (response {status})")]
    UrlNotFound {
        /// Probed URL.
        url: String,
        /// HTTP status code (0 when no response was received).
        status: u16,
    },

    /// A repository has local changes that have not been committed.
    #[error("{repo} has uncommitted changes")]
    Uncommitted {
        /// Repository description.
        repo: String,
    },

    /// A file tracked by the dotfiles repository is missing from home.
    #[error("tracked file is missing: {path}")]
    MissingTrackedFile {
        /// Path relative to home.
        path: String,
    },

    /// A managed path does not exist.
    #[error("{path} does not exist")]
    PathMissing {
        /// Expanded path.
        path: String,
    },

    /// A managed file does not carry the configured permission bits.
    #[error("{path} has mode {actual:o}, expected {expected:o}")]
    WrongMode {
        /// Destination path.
        path: String,
        /// Mode found on disk.
        actual: u32,
        /// Configured mode.
        expected: u32,
    },
}

/// Errors from the repository client.
#[derive(Error, Debug)]
pub enum GitError {
    /// The repository root does not exist.
    #[error("repository not installed: {0}")]
    NotInstalled(String),
}

/// Errors from the shell executor.
#[derive(Error, Debug)]
pub enum ExecError {
    /// A command exited with a non-zero status.
    #[error("exit code {code}")]
    NonZeroExit {
        /// Exit code, or `-1` when terminated by a signal.
        code: i32,
    },
}

fn format_output(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(" and output:\n{output}")
    }
}
