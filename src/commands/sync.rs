//! Sync command: install what is missing, update what is present.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, SyncOpts};
use crate::config::Flags;
use crate::config::flags::SYNC_SELF;
use crate::error::ItemError;
use crate::items::{Context, Item, ItemType};
use crate::logging::{ItemStatus, Log, Logger};

/// What happened to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Was missing and got installed.
    Installed,
    /// Was present and got updated.
    Updated,
    /// Installed and nothing to update with.
    Unchanged,
    /// Missing and no installer.
    NoInstaller,
}

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if setup fails or any item fails; the run stops at the
/// first failing item.
pub fn run(global: &GlobalOpts, opts: &SyncOpts, flags: Flags, log: &Logger) -> Result<()> {
    let flags = flags.with(SYNC_SELF, opts.sync_self);
    let setup = super::CommandSetup::init(global, flags, log)?;
    let result = sync_items(&setup.catalog, &setup.ctx, &opts.filters, opts.strict, log);
    log.print_summary();
    result
}

/// Sync every selected item in catalog order, halting on the first error.
///
/// The self item only takes part when the `sync-self` flag is set.
///
/// # Errors
///
/// Returns the first item error, with the item's name as context.
pub fn sync_items(
    catalog: &[Item],
    ctx: &Context,
    filters: &[String],
    strict: bool,
    log: &dyn Log,
) -> Result<()> {
    for item in super::select(catalog, filters) {
        if item.item_type() == ItemType::Rogu && !ctx.flags.bool(SYNC_SELF) {
            log.debug(&format!("skipping {}: pass --self to update it", item.name()));
            continue;
        }
        match sync_item(item, ctx, strict, log) {
            Ok(Outcome::NoInstaller) => {
                log.record_item(item.name(), ItemStatus::Skipped, Some("no installer"));
            }
            Ok(outcome) => {
                let message = match outcome {
                    Outcome::Installed => Some("installed"),
                    Outcome::Updated => Some("updated"),
                    Outcome::Unchanged | Outcome::NoInstaller => None,
                };
                log.record_item(item.name(), ItemStatus::Ok, message);
            }
            Err(e) => {
                log.record_item(item.name(), ItemStatus::Failed, Some(&format!("{e:#}")));
                return Err(e).with_context(|| format!("syncing {}", item.name()));
            }
        }
    }
    Ok(())
}

/// Bring one item into conformance.
///
/// # Errors
///
/// Returns [`ItemError::NoInstalledCheck`] if the item cannot report
/// whether it is installed, [`ItemError::NoInstaller`] for a missing item
/// without installer under `strict`, and any handler error as is.
pub fn sync_item(item: &Item, ctx: &Context, strict: bool, log: &dyn Log) -> Result<Outcome> {
    let handlers = item.handlers(ctx);
    let label = super::label(item, ctx);

    let Some(is_installed) = handlers.is_installed else {
        return Err(ItemError::NoInstalledCheck {
            name: item.name().to_string(),
        }
        .into());
    };

    if !is_installed()? {
        return match handlers.install {
            Some(install) => {
                log.stage(&format!("Installing {label}"));
                install()?;
                Ok(Outcome::Installed)
            }
            None if strict => Err(ItemError::NoInstaller {
                name: item.name().to_string(),
            }
            .into()),
            None => {
                log.warn(&ItemError::NoInstaller {
                    name: item.name().to_string(),
                }
                .to_string());
                Ok(Outcome::NoInstaller)
            }
        };
    }

    let Some(update) = handlers.update else {
        log.debug(&format!("{label} is installed"));
        return Ok(Outcome::Unchanged);
    };
    log.stage(&format!("Updating {label}"));
    update()?;
    Ok(Outcome::Updated)
}
