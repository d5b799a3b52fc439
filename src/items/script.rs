//! Items driven entirely by shell snippets from the manifest.
use anyhow::{Context as _, Result};

use super::context::Context;
use super::handlers::{Action, ItemHandlers, action, presence};
use super::Item;
use crate::config::{Manifest, ScriptEntry};
use crate::error::{ConfigError, ItemError};

/// A named bundle of shell snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptItem {
    name: String,
    entry: ScriptEntry,
}

/// Build one item per `scripts` entry.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyName`] for an entry with a blank name.
pub fn items(manifest: &Manifest) -> Result<Vec<Item>, ConfigError> {
    manifest
        .scripts
        .iter()
        .map(|(name, entry)| {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyName { kind: "script" });
            }
            Ok(Item::Script(ScriptItem::new(name, entry.clone())))
        })
        .collect()
}

impl ScriptItem {
    /// Wrap the manifest entry stored under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, entry: ScriptEntry) -> Self {
        Self {
            name: name.into(),
            entry,
        }
    }

    /// Manifest key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.entry.priority
    }

    /// Build handlers; every empty snippet leaves its handler absent.
    #[must_use]
    pub fn handlers<'a>(&'a self, ctx: &'a Context) -> ItemHandlers<'a> {
        let entry = &self.entry;

        let is_installed = snippet(&entry.is_installed).and_then(|code| {
            presence(move || {
                let result = ctx.executor.exec(&ctx.home, code)?;
                Ok(result.success())
            })
        });

        let check_code = snippet(&entry.check).or_else(|| snippet(&entry.is_installed));
        let check = check_code.and_then(|code| {
            action(move || {
                let result = ctx.executor.exec(&ctx.home, code)?;
                if result.success() {
                    Ok(())
                } else {
                    Err(ItemError::CheckFailed {
                        code: result.exit_code(),
                        output: result.output.trim_end().to_string(),
                    }
                    .into())
                }
            })
        });

        let install = self.runner(ctx, &entry.install, "install");
        let update = if entry.update_with_install {
            install.clone()
        } else {
            self.runner(ctx, &entry.update, "update")
        };

        ItemHandlers {
            check,
            is_installed,
            install,
            uninstall: self.runner(ctx, &entry.uninstall, "uninstall"),
            update,
        }
    }

    fn runner<'a>(
        &'a self,
        ctx: &'a Context,
        code: &'a str,
        verb: &'static str,
    ) -> Option<Action<'a>> {
        snippet(code).and_then(|code| {
            action(move || run(ctx, code).with_context(|| format!("{verb} {}", self.name)))
        })
    }
}

fn snippet(code: &str) -> Option<&str> {
    let code = code.trim();
    (!code.is_empty()).then_some(code)
}

fn run(ctx: &Context, code: &str) -> Result<()> {
    ctx.executor.run(&ctx.home, code)
}
