//! The bare dotfiles repository checked out directly into home.
//!
//! The repository lives at `~/.dotfiles` with `$HOME` as its work tree, so
//! every git command carries explicit `--git-dir` and `--work-tree` options
//! and runs from home.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::context::Context;
use super::handlers::{ItemHandlers, action, presence};
use crate::config::{self, DotfilesEntry};
use crate::error::ItemError;
use crate::fs;
use crate::git::{self, Repo, RepoOptions};

/// Display name of the dotfiles item.
pub const NAME: &str = "Dotfiles";

/// Fixed priority of the dotfiles item.
pub const PRIORITY: i32 = 60;

/// The bare dotfiles repository checked out over home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotfilesItem {
    url: Option<String>,
    branch: String,
}

/// `~/.dotfiles`.
#[must_use]
pub fn root(home: &Path) -> PathBuf {
    home.join(".dotfiles")
}

impl DotfilesItem {
    /// A blank URL counts as unset.
    #[must_use]
    pub fn new(entry: &DotfilesEntry) -> Self {
        Self {
            url: entry
                .url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            branch: config::branch_or_default(&entry.branch),
        }
    }

    /// Open the bare repository with home as its work tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GitError::NotInstalled`] if it is not cloned.
    pub fn open(&self, ctx: &Context) -> Result<Repo> {
        let root = root(&ctx.home);
        let prefix = format!(
            "git --git-dir={} --work-tree={}",
            shell_words::quote(&root.display().to_string()),
            shell_words::quote(&ctx.home.display().to_string()),
        );
        let options = RepoOptions {
            branch: self.branch.clone(),
            prefix,
            workdir: Some(ctx.home.clone()),
        };
        Ok(git::open(&root, options, ctx.executor.clone())?)
    }

    /// Build the handlers bound to `ctx`.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        ItemHandlers {
            check: action(move || self.check(ctx)),
            is_installed: presence(move || Ok(root(&ctx.home).exists())),
            install: self
                .url
                .as_deref()
                .and_then(|url| action(move || self.install(ctx, url))),
            uninstall: None,
            update: action(move || self.open(ctx)?.sync()),
        }
    }

    fn check(&self, ctx: &Context) -> Result<()> {
        let repo = self.open(ctx)?;
        for file in repo.tracked_files()? {
            if ctx.home.join(&file).symlink_metadata().is_err() {
                return Err(ItemError::MissingTrackedFile { path: file }.into());
            }
        }
        if !repo.modified_files()?.is_empty() {
            return Err(ItemError::Uncommitted {
                repo: repo.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn install(&self, ctx: &Context, url: &str) -> Result<()> {
        let root = root(&ctx.home);
        git::clone_bare(ctx.executor.as_ref(), &ctx.home, url, &root)?;
        let repo = self.open(ctx)?;

        let stamp = fs::backup_stamp();
        for file in repo.tracked_files()? {
            let path = ctx.home.join(&file);
            if path.is_file() {
                let backup = fs::backup(&path, &stamp)?;
                tracing::info!("backed up {} to {}", path.display(), backup.display());
            }
        }

        repo.run("checkout -f {branch}")
            .context("checking out dotfiles")?;
        repo.set_config("advice.addIgnoredFile", "false")?;
        repo.set_config(&format!("branch.{}.remote", self.branch), "origin")?;
        repo.set_config(
            &format!("branch.{}.merge", self.branch),
            &format!("refs/heads/{}", self.branch),
        )?;
        Ok(())
    }
}
