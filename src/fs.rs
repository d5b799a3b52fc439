//! Filesystem helpers shared by items and commands.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// Resolve the current user's home directory from `HOME` (or `USERPROFILE`).
///
/// # Errors
///
/// Returns an error if neither variable is set.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))
}

/// Expand a leading `~` in `path` to `home`.
///
/// Only `~` on its own or followed by a separator is expanded; `~user`
/// forms are returned unchanged.
#[must_use]
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    path.strip_prefix("~/")
        .map_or_else(|| PathBuf::from(path), |rest| home.join(rest))
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}

/// Copy `path` to a sibling carrying a `.<stamp>~` suffix and return the
/// backup path.
///
/// # Errors
///
/// Returns an error if the copy fails.
pub fn backup(path: &Path, stamp: &str) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .with_context(|| format!("cannot back up {}", path.display()))?;
    name.push(format!(".{stamp}~"));
    let dst = path.with_file_name(name);
    std::fs::copy(path, &dst)
        .with_context(|| format!("backing up {} to {}", path.display(), dst.display()))?;
    Ok(dst)
}

/// Timestamp used for backup suffixes (`YYYYmmddTHHMMSS`, local time).
#[must_use]
pub fn backup_stamp() -> String {
    chrono::Local::now().format("%Y%m%dT%H%M%S").to_string()
}

/// Recursively copy a directory tree.
///
/// When `skip_git` is `true`, `.git` directories are skipped, which is what
/// a freshly initialised project wants from a cloned template.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path, skip_git: bool) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            if skip_git && entry.file_name() == ".git" {
                continue;
            }
            copy_dir_recursive(&src_path, &dst_path, skip_git)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
        }
    }
    Ok(())
}

/// Permission bits of `path` (Unix only; `None` elsewhere).
///
/// # Errors
///
/// Returns an error if the metadata cannot be read.
pub fn mode_of(path: &Path) -> Result<Option<u32>> {
    let meta =
        std::fs::metadata(path).with_context(|| format!("reading metadata {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        Ok(Some(meta.permissions().mode() & 0o7777))
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        Ok(None)
    }
}

/// Set the permission bits of `path`. No-op on non-Unix platforms.
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("chmod {mode:o} {}", path.display()))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}
