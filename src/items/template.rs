//! Git repositories cloned under home as project templates.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::context::Context;
use super::handlers::{ItemHandlers, action, presence};
use super::Item;
use crate::config::{self, Manifest, TemplateEntry};
use crate::error::{ConfigError, ItemError};
use crate::git::{self, Repo, RepoOptions};

/// A template repository kept at `~/.<repo name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateItem {
    name: String,
    priority: i32,
    url: String,
    branch: String,
}

/// Build one item per `templates` entry.
///
/// # Errors
///
/// Returns a [`ConfigError`] for a blank name or an empty `url`.
pub fn items(manifest: &Manifest) -> Result<Vec<Item>, ConfigError> {
    manifest
        .templates
        .iter()
        .map(|(name, entry)| TemplateItem::from_entry(name, entry).map(Item::Template))
        .collect()
}

/// `~/.<basename of url without .git>`.
#[must_use]
pub fn root_for(url: &str, home: &Path) -> PathBuf {
    let trimmed = url.trim().trim_end_matches('/');
    let base = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    let base = base.strip_suffix(".git").unwrap_or(base);
    home.join(format!(".{base}"))
}

impl TemplateItem {
    /// Validate `entry` and build the item.
    ///
    /// # Errors
    ///
    /// See [`items`].
    pub fn from_entry(name: &str, entry: &TemplateEntry) -> Result<Self, ConfigError> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName { kind: "template" });
        }
        if entry.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                kind: "template",
                name: name.to_string(),
                field: "url",
            });
        }
        Ok(Self {
            name: name.to_string(),
            priority: entry.priority,
            url: entry.url.trim().to_string(),
            branch: config::branch_or_default(&entry.branch),
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

    /// Where the template is cloned.
    #[must_use]
    pub fn root(&self, home: &Path) -> PathBuf {
        root_for(&self.url, home)
    }

    /// Open the cloned template bound to its branch.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::GitError::NotInstalled`] if it is not cloned.
    pub fn open(&self, ctx: &Context) -> Result<Repo> {
        let repo = git::open(
            &self.root(&ctx.home),
            RepoOptions::branch(self.branch.clone()),
            ctx.executor.clone(),
        )?;
        Ok(repo)
    }

    /// Build the handlers bound to `ctx`.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        ItemHandlers {
            check: action(move || {
                let repo = self.open(ctx)?;
                if repo.modified_files()?.is_empty() {
                    Ok(())
                } else {
                    Err(ItemError::Uncommitted {
                        repo: repo.to_string(),
                    }
                    .into())
                }
            }),
            is_installed: presence(move || Ok(self.root(&ctx.home).exists())),
            install: action(move || {
                git::clone(
                    ctx.executor.as_ref(),
                    &ctx.home,
                    &self.url,
                    &self.root(&ctx.home),
                )
            }),
            uninstall: None,
            update: action(move || self.open(ctx)?.sync()),
        }
    }
}
