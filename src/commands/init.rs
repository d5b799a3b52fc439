//! Init command: start a project from an installed template.
use anyhow::{Context as _, Result};
use std::path::Path;

use crate::cli::{GlobalOpts, InitOpts};
use crate::config::Flags;
use crate::fs;
use crate::items::{Context, Item, TemplateItem};
use crate::logging::{Log, Logger};

/// Run the init command.
///
/// # Errors
///
/// Returns an error if setup fails, the template is unknown or not
/// installed, or the current directory is already a git repository.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &InitOpts, flags: Flags, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, flags, log)?;
    let templates = templates(&setup.catalog);
    if opts.list {
        for template in templates {
            println!("{}", template.name());
        }
        return Ok(());
    }
    let Some(name) = opts.template.as_deref() else {
        anyhow::bail!("no template specified");
    };
    let template = templates
        .into_iter()
        .find(|t| t.name() == name)
        .with_context(|| format!("no template found for {name:?}"))?;
    let dir = std::env::current_dir().context("reading current directory")?;
    init_project(template, &setup.ctx, &dir, log)
}

/// Template items of the catalog, in catalog order.
#[must_use]
pub fn templates(catalog: &[Item]) -> Vec<&TemplateItem> {
    catalog
        .iter()
        .filter_map(|item| match item {
            Item::Template(t) => Some(t),
            _ => None,
        })
        .collect()
}

/// Copy `template`'s tree (without `.git`) into `dir` and run `git init`.
///
/// # Errors
///
/// Returns an error if `dir` is already a repository, the template is not
/// cloned, or copying or `git init` fails.
pub fn init_project(template: &TemplateItem, ctx: &Context, dir: &Path, log: &dyn Log) -> Result<()> {
    if dir.join(".git").exists() {
        anyhow::bail!("already in a git repository: {}", dir.display());
    }
    let root = template.root(&ctx.home);
    if !root.exists() {
        anyhow::bail!(
            "template {} is not installed (run `rogu sync {}`)",
            template.name(),
            template.name()
        );
    }
    log.stage(&format!("Initialising {} project", template.name()));
    fs::copy_dir_recursive(&root, dir, true)?;
    ctx.executor
        .run(dir, "git init")
        .context("git init")?;
    log.info(&format!("initialised {} from {}", dir.display(), root.display()));
    Ok(())
}
